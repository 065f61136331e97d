//! Third-person follow camera.
//!
//! Two anchors ride on the player's container. The camera eases toward the
//! position anchor and looks at an eased copy of the look-at anchor, so it
//! trails rotation and translation instead of snapping to them.

mod follow;


pub use follow::{CAMERA_SMOOTHING, FollowCamera, follow_step};

use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;

use crate::core::GameState;
use crate::movement::ControllerSet;

/// Where the camera starts before it begins trailing the player.
const CAMERA_START: Vec3 = Vec3::new(3.0, 3.0, 3.0);
const CAMERA_FOV_DEGREES: f32 = 40.0;

/// Camera position anchor, child of the player container.
#[derive(Component, Debug)]
pub struct CameraPositionAnchor;

/// Camera look-at anchor, child of the player container.
#[derive(Component, Debug)]
pub struct CameraLookAtAnchor;

pub struct CameraFollowPlugin;

impl Plugin for CameraFollowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn_follow_camera)
            .add_systems(
                Update,
                follow_camera
                    .after(ControllerSet)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

fn spawn_follow_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Follow Camera"),
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(CAMERA_START).looking_at(Vec3::ZERO, Vec3::Y),
        FollowCamera::new(CAMERA_START),
    ));
}

/// Advance the camera toward the anchors' current world positions.
///
/// Anchor positions are computed from the hierarchy on demand, so the
/// container rotation written earlier this frame is already reflected.
pub(crate) fn follow_camera(
    position_anchor: Query<Entity, With<CameraPositionAnchor>>,
    look_at_anchor: Query<Entity, With<CameraLookAtAnchor>>,
    mut params: ParamSet<(
        TransformHelper,
        Query<(&mut FollowCamera, &mut Transform)>,
    )>,
) {
    let (Ok(position_anchor), Ok(look_at_anchor)) =
        (position_anchor.single(), look_at_anchor.single())
    else {
        return;
    };

    let helper = params.p0();
    let (Ok(position_world), Ok(look_at_world)) = (
        helper.compute_global_transform(position_anchor),
        helper.compute_global_transform(look_at_anchor),
    ) else {
        debug!("Camera anchors not ready, skipping frame");
        return;
    };
    let position_world = position_world.translation();
    let look_at_world = look_at_world.translation();

    let mut cameras = params.p1();
    let Ok((mut rig, mut transform)) = cameras.single_mut() else {
        return;
    };

    rig.advance(position_world, look_at_world);
    transform.translation = rig.smoothed_position;
    transform.look_at(rig.smoothed_look_at, Vec3::Y);
}
