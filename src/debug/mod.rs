//! Debug mode for live controller tuning.
//!
//! Features:
//! - Tuning panel (F1 or `) with -/+ buttons for walk, run and rotation speed
//! - Ctrl+1..3 to select a parameter, Ctrl+= / Ctrl+- to adjust it
//! - Ctrl+I info overlay (position, yaw, animation, jumps)
//! - Ctrl+J logs a JSON snapshot of tuning and telemetry

mod state;
mod systems;
mod ui;


pub use state::{DebugAction, DebugState};

use bevy::prelude::*;

use crate::debug::systems::{
    handle_debug_buttons, handle_debug_hotkeys, toggle_debug_ui, update_debug_info_overlay,
    update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                toggle_debug_ui,
                handle_debug_hotkeys,
                handle_debug_buttons,
                update_status_message,
                update_debug_info_overlay,
            )
                .chain(),
        );
    }
}
