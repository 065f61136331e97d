//! Movement domain: world-space horizontal velocity from local movement.

use bevy::prelude::*;

use crate::movement::MovementVector;

/// Replace the horizontal part of `velocity`, keeping its vertical part.
///
/// Moving: heads along `container_yaw + character_yaw` at `speed`.
/// Idle: horizontal velocity is zeroed.
pub fn solve_velocity(
    velocity: Vec3,
    movement: MovementVector,
    speed: f32,
    container_yaw: f32,
    character_yaw: f32,
) -> Vec3 {
    if movement.is_idle() {
        return Vec3::new(0.0, velocity.y, 0.0);
    }

    let heading = container_yaw + character_yaw;
    Vec3::new(heading.sin() * speed, velocity.y, heading.cos() * speed)
}
