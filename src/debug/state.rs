//! Debug domain: state and action definitions for the tuning overlay.

use bevy::prelude::*;

use crate::movement::TuningParam;

/// Resource tracking debug mode state
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Whether the tuning panel is visible
    pub ui_visible: bool,
    /// Whether to show the info overlay (position, yaw, animation, jumps)
    pub show_info: bool,
    /// Parameter the Ctrl+=/Ctrl+- hotkeys adjust
    pub selected: TuningParam,
    /// Message to display temporarily in the panel
    pub status_message: Option<(String, f32)>,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            ui_visible: false,
            show_info: false,
            selected: TuningParam::WalkSpeed,
            status_message: None,
        }
    }
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }

    /// Count down the status message; clears it once expired.
    pub fn tick_message(&mut self, delta: f32) {
        if let Some((_, ref mut remaining)) = self.status_message {
            *remaining -= delta;
            if *remaining <= 0.0 {
                self.status_message = None;
            }
        }
    }
}

/// Actions that can be triggered from the tuning panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugAction {
    Adjust(TuningParam, i32),
    ToggleInfo,
    ExportSnapshot,
    Close,
}
