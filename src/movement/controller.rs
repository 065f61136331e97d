//! Movement domain: the per-frame controller step.
//!
//! `step_character` is the whole control loop minus scene access: it reads
//! the frame input, talks to the physics body through [`PhysicsBody`] and
//! leaves visual yaws in [`CharacterState`] for the caller to apply.

use bevy::prelude::*;

use crate::animation::{AnimationLabel, select_animation};
use crate::movement::velocity::solve_velocity;
use crate::movement::{
    CharacterState, ControllerTuning, FrameInput, ResolvedMovement, resolve_movement,
};

/// Velocity/position surface of the rigid body the controller drives.
pub trait PhysicsBody {
    fn linear_velocity(&self) -> Vec3;
    fn translation(&self) -> Vec3;
    /// Overwrite the body's velocity. `wake` asks the solver to wake a
    /// sleeping body so the write takes effect.
    fn set_linear_velocity(&mut self, velocity: Vec3, wake: bool);
}

/// What happened during one controller step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub resolved: ResolvedMovement,
    pub animation: AnimationLabel,
    pub grounded: bool,
    pub jumped: bool,
}

pub fn step_character(
    state: &mut CharacterState,
    input: &FrameInput,
    tuning: &ControllerTuning,
    body: &mut impl PhysicsBody,
) -> FrameReport {
    let resolved = resolve_movement(input, tuning);

    state.update_rotation_targets(resolved.movement, tuning.rotation_speed);

    let mut velocity = solve_velocity(
        body.linear_velocity(),
        resolved.movement,
        resolved.speed,
        state.container_yaw_target,
        state.character_yaw_target,
    );

    let mut animation = select_animation(resolved.movement, resolved.gait);

    let height = body.translation().y;
    let grounded = state
        .jumps
        .reset_if_grounded(height, velocity.y, tuning.ground_threshold);

    let jumped = state.jumps.try_jump(input.jump);
    if jumped {
        velocity.y = tuning.jump_impulse;
        animation = AnimationLabel::Jump;
        debug!("Jump {} (impulse {})", state.jumps.count(), tuning.jump_impulse);
    }

    body.set_linear_velocity(velocity, true);

    state.smooth_rotations();

    FrameReport {
        resolved,
        animation,
        grounded,
        jumped,
    }
}
