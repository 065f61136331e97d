//! Core domain: boot flow and static world setup.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::core::state::GameState;

/// Half extent of the square ground slab.
const GROUND_HALF_EXTENT: f32 = 25.0;
const GROUND_THICKNESS: f32 = 0.2;

pub(crate) fn finish_boot(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Playing);
}

pub(crate) fn log_state_transitions(state: Res<State<GameState>>) {
    if state.is_changed() {
        debug!("Game state: {:?}", state.get());
    }
}

/// Spawn the ground slab (top face at y = 0) and the sun.
pub(crate) fn spawn_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let size = GROUND_HALF_EXTENT * 2.0;

    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Cuboid::new(size, GROUND_THICKNESS, size))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.45, 0.35))),
        Transform::from_xyz(0.0, -GROUND_THICKNESS * 0.5, 0.0),
        RigidBody::Static,
        Collider::cuboid(size, GROUND_THICKNESS, size),
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(-15.0, 10.0, 15.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("World ready");
}
