//! Serde definitions for the controller content file.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::{ControllerTuning, RigLayout};

/// Contents of `controller.ron`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ControllerDefaults {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Container yaw per frame at full lateral input, in degrees.
    pub rotation_speed_degrees: f32,
    pub jump_impulse: f32,
    pub ground_threshold: f32,
    pub spawn_height: f32,
    pub camera_anchor_offset: (f32, f32, f32),
    pub look_at_anchor_offset: (f32, f32, f32),
}

impl Default for ControllerDefaults {
    fn default() -> Self {
        let tuning = ControllerTuning::default();
        let layout = RigLayout::default();
        Self {
            walk_speed: tuning.walk_speed,
            run_speed: tuning.run_speed,
            rotation_speed_degrees: tuning.rotation_speed.to_degrees(),
            jump_impulse: tuning.jump_impulse,
            ground_threshold: tuning.ground_threshold,
            spawn_height: layout.spawn_height,
            camera_anchor_offset: layout.camera_anchor_offset.into(),
            look_at_anchor_offset: layout.look_at_anchor_offset.into(),
        }
    }
}

impl ControllerDefaults {
    pub fn tuning(&self) -> ControllerTuning {
        ControllerTuning {
            walk_speed: self.walk_speed,
            run_speed: self.run_speed,
            rotation_speed: self.rotation_speed_degrees.to_radians(),
            jump_impulse: self.jump_impulse,
            ground_threshold: self.ground_threshold,
        }
    }

    pub fn rig_layout(&self) -> RigLayout {
        RigLayout {
            spawn_height: self.spawn_height,
            camera_anchor_offset: Vec3::from(self.camera_anchor_offset),
            look_at_anchor_offset: Vec3::from(self.look_at_anchor_offset),
        }
    }
}
