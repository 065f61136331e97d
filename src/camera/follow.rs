//! Exponential follow smoothing for the camera rig.

use bevy::prelude::*;

/// Fraction of the remaining distance covered per frame. Not scaled by frame
/// time.
pub const CAMERA_SMOOTHING: f32 = 0.1;

/// One smoothing step from `current` toward `target`.
pub fn follow_step(current: Vec3, target: Vec3) -> Vec3 {
    current.lerp(target, CAMERA_SMOOTHING)
}

/// Smoothed camera state, persisted across frames.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera {
    pub smoothed_position: Vec3,
    pub smoothed_look_at: Vec3,
}

impl FollowCamera {
    /// Start at the camera's spawn position, looking at the origin.
    pub fn new(start: Vec3) -> Self {
        Self {
            smoothed_position: start,
            smoothed_look_at: Vec3::ZERO,
        }
    }

    pub fn advance(&mut self, position_anchor: Vec3, look_at_anchor: Vec3) {
        self.smoothed_position = follow_step(self.smoothed_position, position_anchor);
        self.smoothed_look_at = follow_step(self.smoothed_look_at, look_at_anchor);
    }
}
