//! Movement domain: player controller plugin wiring and public exports.
//!
//! The controller core (`angle`, `input`, `jump`, `velocity`, `controller`
//! and the methods on [`CharacterState`]) is plain Rust over small value
//! types. The systems in `systems` adapt it to Bevy input and avian3d.

pub mod angle;
mod bootstrap;
mod components;
mod controller;
mod input;
mod jump;
mod resources;
pub(crate) mod systems;
mod velocity;

#[cfg(test)]
mod tests;

pub use components::{
    CharacterModel, CharacterState, Container, ControllerRig, Player, ROTATION_SMOOTHING,
};
pub use controller::{FrameReport, PhysicsBody, step_character};
pub use input::{
    Action, FrameInput, Gait, InputSource, MovementVector, PointerSample, ResolvedMovement,
    resolve_movement,
};
pub use jump::{JumpCounter, MAX_JUMPS};
pub use resources::{
    ActionBindings, CharacterTelemetry, ControllerTuning, PointerState, RigLayout, TuningParam,
};
pub use velocity::solve_velocity;

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{drive_character, sample_frame_input, track_pointer_activity};

/// System set for the controller frame, so the camera can order after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerSet;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControllerTuning>()
            .init_resource::<RigLayout>()
            .init_resource::<ActionBindings>()
            .init_resource::<PointerState>()
            .init_resource::<FrameInput>()
            .init_resource::<CharacterTelemetry>()
            .add_systems(OnEnter(GameState::Playing), spawn_player)
            .add_systems(
                Update,
                (track_pointer_activity, sample_frame_input, drive_character)
                    .chain()
                    .in_set(ControllerSet)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
