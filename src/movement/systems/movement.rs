//! Movement domain: drives the player body from the sampled frame input.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::animation::CharacterAnimation;
use crate::movement::{
    CharacterModel, CharacterState, CharacterTelemetry, Container, ControllerRig,
    ControllerTuning, FrameInput, PhysicsBody, Player, step_character,
};

/// avian3d body seen through the controller's physics contract.
pub(crate) struct AvianBody<'a> {
    pub velocity: &'a mut LinearVelocity,
    pub transform: &'a Transform,
}

impl PhysicsBody for AvianBody<'_> {
    fn linear_velocity(&self) -> Vec3 {
        self.velocity.0
    }

    fn translation(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_linear_velocity(&mut self, velocity: Vec3, _wake: bool) {
        // Player bodies spawn with SleepingDisabled, so they never need waking.
        self.velocity.0 = velocity;
    }
}

/// One controller frame: step the character, apply the smoothed yaws to the
/// rig and publish the pose. Skips the frame if any part of the rig is
/// missing.
pub(crate) fn drive_character(
    input: Res<FrameInput>,
    tuning: Res<ControllerTuning>,
    mut telemetry: ResMut<CharacterTelemetry>,
    mut players: Query<
        (
            &mut CharacterState,
            &mut LinearVelocity,
            &Transform,
            &ControllerRig,
            &mut CharacterAnimation,
        ),
        With<Player>,
    >,
    mut visuals: Query<
        &mut Transform,
        (
            Without<Player>,
            Or<(With<Container>, With<CharacterModel>)>,
        ),
    >,
) {
    let Ok((mut state, mut velocity, transform, rig, mut animation)) = players.single_mut() else {
        debug!("Player not ready, skipping frame");
        return;
    };

    let Ok([mut container, mut model]) = visuals.get_many_mut([rig.container, rig.model]) else {
        debug!("Controller rig not ready, skipping frame");
        return;
    };

    let mut body = AvianBody {
        velocity: &mut velocity,
        transform,
    };
    let report = step_character(&mut state, &input, &tuning, &mut body);

    container.rotation = Quat::from_rotation_y(state.visual_container_yaw);
    model.rotation = Quat::from_rotation_y(state.visual_character_yaw);

    if animation.bypass_change_detection().set(report.animation) {
        animation.set_changed();
    }

    // The model sits at the container origin, which sits at the body origin.
    telemetry.position = transform.translation.to_array();
    telemetry.container_yaw = state.visual_container_yaw;
}
