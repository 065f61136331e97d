//! Movement domain: device sampling for the controller.

use bevy::input::ButtonState;
use bevy::input::mouse::MouseButtonInput;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::movement::{Action, ActionBindings, FrameInput, InputSource, PointerState};

/// Keyboard + pointer state seen through the controller's polling contract.
pub(crate) struct DeviceInput<'a> {
    pub keyboard: &'a ButtonInput<KeyCode>,
    pub bindings: &'a ActionBindings,
    pub pointer: &'a PointerState,
}

impl InputSource for DeviceInput<'_> {
    fn action(&self, action: Action) -> bool {
        let keys = match action {
            Action::Forward => &self.bindings.forward,
            Action::Backward => &self.bindings.backward,
            Action::Left => &self.bindings.left,
            Action::Right => &self.bindings.right,
            Action::Run => &self.bindings.run,
            Action::Jump => &self.bindings.jump,
        };
        self.keyboard.any_pressed(keys.iter().copied())
    }

    fn is_pointer_active(&self) -> bool {
        self.pointer.active
    }

    fn pointer_coordinates(&self) -> Vec2 {
        self.pointer.ndc
    }
}

/// Convert a window-space cursor position (origin top-left, y down) to
/// normalized device coordinates (origin center, y up).
pub(crate) fn cursor_to_ndc(cursor: Vec2, window_size: Vec2) -> Vec2 {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        cursor.x / window_size.x * 2.0 - 1.0,
        1.0 - cursor.y / window_size.y * 2.0,
    )
}

/// Press/release of any mouse button or a touch start/end toggles the
/// pointer flag; this is the only writer of [`PointerState`].
pub(crate) fn track_pointer_activity(
    mut mouse_buttons: MessageReader<MouseButtonInput>,
    mut touches: MessageReader<TouchInput>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerState>,
) {
    let was_active = pointer.active;

    for event in mouse_buttons.read() {
        pointer.active = event.state == ButtonState::Pressed;
    }

    let mut touch_position = None;
    for touch in touches.read() {
        match touch.phase {
            TouchPhase::Started => {
                pointer.active = true;
                touch_position = Some(touch.position);
            }
            TouchPhase::Moved => touch_position = Some(touch.position),
            TouchPhase::Ended | TouchPhase::Canceled => pointer.active = false,
        }
    }

    if pointer.active != was_active {
        debug!("Pointer active: {}", pointer.active);
    }

    let Ok(window) = windows.single() else {
        return;
    };

    if let Some(position) = touch_position.or_else(|| window.cursor_position()) {
        pointer.ndc = cursor_to_ndc(position, window.size());
    }
}

pub(crate) fn sample_frame_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<ActionBindings>,
    pointer: Res<PointerState>,
    mut frame_input: ResMut<FrameInput>,
) {
    let source = DeviceInput {
        keyboard: &keyboard,
        bindings: &bindings,
        pointer: &pointer,
    };
    *frame_input = FrameInput::sample(&source);
}
