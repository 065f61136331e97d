//! Movement domain: tuning, input and published-state resources.

use bevy::prelude::*;
use serde::Serialize;

/// Live controller parameters. Systems read this fresh every frame, so the
/// tuning overlay can change it at any time.
#[derive(Resource, Debug, Clone, PartialEq, Serialize)]
pub struct ControllerTuning {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Container yaw added per frame at full lateral input (radians).
    pub rotation_speed: f32,
    /// Vertical velocity applied by a jump.
    pub jump_impulse: f32,
    /// Body height at or below which the character counts as grounded.
    pub ground_threshold: f32,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            walk_speed: 0.8,
            run_speed: 1.6,
            rotation_speed: 0.5_f32.to_radians(),
            jump_impulse: 4.0,
            ground_threshold: 0.26,
        }
    }
}

impl ControllerTuning {
    pub fn get(&self, param: TuningParam) -> f32 {
        match param {
            TuningParam::WalkSpeed => self.walk_speed,
            TuningParam::RunSpeed => self.run_speed,
            TuningParam::RotationSpeed => self.rotation_speed,
        }
    }

    /// Overwrite a live parameter. No range checks happen here; callers that
    /// expose the value to a user clamp with [`TuningParam::range`].
    pub fn set(&mut self, param: TuningParam, value: f32) {
        match param {
            TuningParam::WalkSpeed => self.walk_speed = value,
            TuningParam::RunSpeed => self.run_speed = value,
            TuningParam::RotationSpeed => self.rotation_speed = value,
        }
    }
}

/// The parameters the tuning overlay can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TuningParam {
    WalkSpeed,
    RunSpeed,
    RotationSpeed,
}

impl TuningParam {
    pub const ALL: [TuningParam; 3] = [
        TuningParam::WalkSpeed,
        TuningParam::RunSpeed,
        TuningParam::RotationSpeed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TuningParam::WalkSpeed => "Walk speed",
            TuningParam::RunSpeed => "Run speed",
            TuningParam::RotationSpeed => "Rotation speed",
        }
    }

    /// Inclusive (min, max) the overlay allows.
    pub fn range(self) -> (f32, f32) {
        match self {
            TuningParam::WalkSpeed => (0.1, 4.0),
            TuningParam::RunSpeed => (0.2, 12.0),
            TuningParam::RotationSpeed => (0.1_f32.to_radians(), 5.0_f32.to_radians()),
        }
    }

    pub fn step(self) -> f32 {
        match self {
            TuningParam::WalkSpeed | TuningParam::RunSpeed => 0.1,
            TuningParam::RotationSpeed => 0.1_f32.to_radians(),
        }
    }

    /// Move `value` by `steps` increments, clamped to the overlay range.
    pub fn nudge(self, value: f32, steps: i32) -> f32 {
        let (min, max) = self.range();
        (value + self.step() * steps as f32).clamp(min, max)
    }

    /// Value formatted for display (rotation shown in degrees).
    pub fn display(self, value: f32) -> String {
        match self {
            TuningParam::RotationSpeed => format!("{:.1} deg", value.to_degrees()),
            _ => format!("{:.1}", value),
        }
    }
}

/// Character pose published every frame for read-only consumers elsewhere
/// in the app (followers, HUD, debug overlay).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CharacterTelemetry {
    pub position: [f32; 3],
    pub container_yaw: f32,
}

impl CharacterTelemetry {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Pointer press state, written from input messages only.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub active: bool,
    /// Last known pointer position in normalized device coordinates.
    pub ndc: Vec2,
}

/// Key map for the named movement actions.
#[derive(Resource, Debug, Clone)]
pub struct ActionBindings {
    pub forward: Vec<KeyCode>,
    pub backward: Vec<KeyCode>,
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub run: Vec<KeyCode>,
    pub jump: Vec<KeyCode>,
}

impl Default for ActionBindings {
    fn default() -> Self {
        Self {
            forward: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            backward: vec![KeyCode::KeyS, KeyCode::ArrowDown],
            left: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
            right: vec![KeyCode::KeyD, KeyCode::ArrowRight],
            run: vec![KeyCode::ShiftLeft, KeyCode::ShiftRight],
            jump: vec![KeyCode::Space],
        }
    }
}

/// Where the player rig and its camera anchors are placed at spawn.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RigLayout {
    pub spawn_height: f32,
    /// Camera position anchor, local to the container.
    pub camera_anchor_offset: Vec3,
    /// Camera look-at anchor, local to the container.
    pub look_at_anchor_offset: Vec3,
}

impl Default for RigLayout {
    fn default() -> Self {
        Self {
            spawn_height: 1.0,
            camera_anchor_offset: Vec3::new(0.0, 4.0, -4.0),
            look_at_anchor_offset: Vec3::new(0.0, 0.0, 1.5),
        }
    }
}
