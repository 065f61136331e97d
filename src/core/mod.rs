//! Core domain: app state and the static world the player runs around in.

mod state;
mod systems;

pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{finish_boot, log_state_transitions, spawn_world};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(Update, finish_boot.run_if(in_state(GameState::Boot)))
            .add_systems(Update, log_state_transitions)
            .add_systems(OnEnter(GameState::Playing), spawn_world);
    }
}
