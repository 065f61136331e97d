//! Movement domain: player rig spawning.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::animation::CharacterAnimation;
use crate::camera::{CameraLookAtAnchor, CameraPositionAnchor};
use crate::movement::{CharacterModel, CharacterState, Container, ControllerRig, Player, RigLayout};

/// Capsule radius and cylinder length of the player collider.
const CAPSULE_RADIUS: f32 = 0.15;
const CAPSULE_LENGTH: f32 = 0.16;

/// Spawn the player hierarchy:
///
/// ```text
/// Player (rigid body)
/// └── Container (orbit yaw)
///     ├── camera position anchor
///     ├── camera look-at anchor
///     └── CharacterModel (facing yaw)
///         └── placeholder meshes
/// ```
pub(crate) fn spawn_player(
    mut commands: Commands,
    layout: Res<RigLayout>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let body = commands
        .spawn((
            Name::new("Player"),
            Player,
            CharacterState::default(),
            CharacterAnimation::default(),
            Transform::from_xyz(0.0, layout.spawn_height, 0.0),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::capsule(CAPSULE_RADIUS, CAPSULE_LENGTH),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            SleepingDisabled,
        ))
        .id();

    let container = commands
        .spawn((
            Name::new("Container"),
            Container,
            Transform::default(),
            Visibility::default(),
            ChildOf(body),
        ))
        .id();

    commands.spawn((
        Name::new("Camera Position Anchor"),
        CameraPositionAnchor,
        Transform::from_translation(layout.camera_anchor_offset),
        ChildOf(container),
    ));
    commands.spawn((
        Name::new("Camera Look-at Anchor"),
        CameraLookAtAnchor,
        Transform::from_translation(layout.look_at_anchor_offset),
        ChildOf(container),
    ));

    let model = commands
        .spawn((
            Name::new("Character"),
            CharacterModel,
            Transform::default(),
            Visibility::default(),
            ChildOf(container),
        ))
        .id();

    // Stand-in for the character mesh; the nose marks the facing (+Z).
    let skin = materials.add(Color::srgb(0.85, 0.75, 0.6));
    commands.spawn((
        Mesh3d(meshes.add(Capsule3d::new(CAPSULE_RADIUS, CAPSULE_LENGTH))),
        MeshMaterial3d(skin.clone()),
        Transform::default(),
        ChildOf(model),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.06, 0.06, 0.1))),
        MeshMaterial3d(skin),
        Transform::from_xyz(0.0, 0.1, CAPSULE_RADIUS),
        ChildOf(model),
    ));

    commands.entity(body).insert(ControllerRig { container, model });

    info!(
        "Spawned player at height {} (camera anchor {:?}, look-at anchor {:?})",
        layout.spawn_height, layout.camera_anchor_offset, layout.look_at_anchor_offset
    );
}
