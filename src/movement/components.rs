//! Movement domain: player components and per-character controller state.

use bevy::math::FloatExt;
use bevy::prelude::*;

use crate::movement::angle::lerp_angle;
use crate::movement::{JumpCounter, MovementVector};

/// Fraction of the remaining yaw covered each frame by the visuals.
pub const ROTATION_SMOOTHING: f32 = 0.1;

/// Marker for the player's rigid body.
#[derive(Component, Debug)]
pub struct Player;

/// Marker for the rotating container (camera-orbit yaw).
#[derive(Component, Debug)]
pub struct Container;

/// Marker for the node carrying the character's own facing.
#[derive(Component, Debug)]
pub struct CharacterModel;

/// Entities the controller writes visual rotations to.
#[derive(Component, Debug, Clone, Copy)]
pub struct ControllerRig {
    pub container: Entity,
    pub model: Entity,
}

/// Controller state that persists across frames.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CharacterState {
    /// Accumulated container yaw. Never wrapped.
    pub container_yaw_target: f32,
    /// Last facing derived from non-zero movement.
    pub character_yaw_target: f32,
    pub visual_container_yaw: f32,
    pub visual_character_yaw: f32,
    pub jumps: JumpCounter,
}

impl CharacterState {
    /// Integrate container yaw from lateral input and derive the facing
    /// target from the movement direction. Idle frames keep the old facing.
    pub fn update_rotation_targets(&mut self, movement: MovementVector, rotation_speed: f32) {
        if movement.x != 0.0 {
            self.container_yaw_target += rotation_speed * movement.x;
        }
        if !movement.is_idle() {
            self.character_yaw_target = movement.x.atan2(movement.z);
        }
    }

    /// Ease both visual yaws toward their targets. The facing takes the short
    /// way around; the container is a plain lerp on the raw accumulator.
    pub fn smooth_rotations(&mut self) {
        self.visual_character_yaw = lerp_angle(
            self.visual_character_yaw,
            self.character_yaw_target,
            ROTATION_SMOOTHING,
        );
        self.visual_container_yaw = self
            .visual_container_yaw
            .lerp(self.container_yaw_target, ROTATION_SMOOTHING);
    }
}
