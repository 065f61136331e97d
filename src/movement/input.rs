//! Movement domain: per-frame input snapshot and movement resolution.

use bevy::prelude::*;

use crate::movement::ControllerTuning;

/// Pointer drag below this magnitude on x does not steer.
const POINTER_DEAD_ZONE: f32 = 0.1;
/// Added to the pointer y so a press near screen center still walks forward.
const POINTER_FORWARD_BIAS: f32 = 0.4;
/// Pointer-driven axes beyond this force the run speed.
const POINTER_RUN_THRESHOLD: f32 = 0.5;

/// Named boolean actions polled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Run,
    Jump,
}

/// Polling contract the controller reads input through.
pub trait InputSource {
    fn action(&self, action: Action) -> bool;
    fn is_pointer_active(&self) -> bool;
    /// Pointer position in [-1, 1] on both axes, +y up.
    fn pointer_coordinates(&self) -> Vec2;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub active: bool,
    pub x: f32,
    pub y: f32,
}

/// Input sampled at the start of a frame. Nothing mutates it until the next
/// sample.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
    pub jump: bool,
    pub pointer: PointerSample,
}

impl FrameInput {
    pub fn sample(source: &impl InputSource) -> Self {
        let coords = source.pointer_coordinates();
        Self {
            forward: source.action(Action::Forward),
            backward: source.action(Action::Backward),
            left: source.action(Action::Left),
            right: source.action(Action::Right),
            run: source.action(Action::Run),
            jump: source.action(Action::Jump),
            pointer: PointerSample {
                active: source.is_pointer_active(),
                x: coords.x,
                y: coords.y,
            },
        }
    }
}

/// Local movement direction: x is lateral (+x turns left), z is forward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementVector {
    pub x: f32,
    pub z: f32,
}

impl MovementVector {
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    pub fn is_idle(&self) -> bool {
        self.x == 0.0 && self.z == 0.0
    }
}

/// `Run` whenever the selected speed equals the tuned run speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Gait {
    #[default]
    Walk,
    Run,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMovement {
    pub movement: MovementVector,
    pub speed: f32,
    pub gait: Gait,
}

/// Combine keys and pointer drag into a movement vector and speed.
///
/// Steps run in a fixed order and later steps overwrite earlier writes to
/// the same axis: forward/backward keys, run key, pointer drag, then
/// left/right keys.
pub fn resolve_movement(input: &FrameInput, tuning: &ControllerTuning) -> ResolvedMovement {
    let mut movement = MovementVector::ZERO;

    if input.forward {
        movement.z = 1.0;
    }
    if input.backward {
        movement.z = -1.0;
    }

    let mut run_requested = input.run;

    if input.pointer.active {
        if input.pointer.x.abs() > POINTER_DEAD_ZONE {
            movement.x = -input.pointer.x;
        }
        movement.z = input.pointer.y + POINTER_FORWARD_BIAS;
        if movement.x.abs() > POINTER_RUN_THRESHOLD || movement.z.abs() > POINTER_RUN_THRESHOLD {
            run_requested = true;
        }
    }

    if input.left {
        movement.x = 1.0;
    }
    if input.right {
        movement.x = -1.0;
    }

    let speed = if run_requested {
        tuning.run_speed
    } else {
        tuning.walk_speed
    };
    // Equal walk and run speeds label the gait as a run.
    let gait = if speed == tuning.run_speed {
        Gait::Run
    } else {
        Gait::Walk
    };

    ResolvedMovement {
        movement,
        speed,
        gait,
    }
}
