//! Debug domain: debug systems for input and live tuning.

use bevy::prelude::*;
use serde::Serialize;

use crate::animation::{AnimationLabel, CharacterAnimation};
use crate::debug::state::{DebugAction, DebugState};
use crate::debug::ui::{
    DebugButton, DebugInfoOverlay, DebugStatusMessage, DebugUI, refresh_debug_ui,
    spawn_debug_info_overlay, spawn_debug_ui,
};
use crate::movement::{CharacterState, CharacterTelemetry, ControllerTuning, Player, TuningParam};

const MESSAGE_SECONDS: f32 = 2.0;

/// Ctrl+key hotkeys; none of these may overlap a movement binding.
pub(crate) const SELECT_KEYS: [KeyCode; 3] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];
pub(crate) const INCREASE_KEY: KeyCode = KeyCode::Equal;
pub(crate) const DECREASE_KEY: KeyCode = KeyCode::Minus;
pub(crate) const INFO_KEY: KeyCode = KeyCode::KeyI;
pub(crate) const SNAPSHOT_KEY: KeyCode = KeyCode::KeyJ;

/// Player-side values the overlay reports, when a player exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct PlayerReadout {
    pub animation: AnimationLabel,
    pub jumps: u8,
}

#[derive(Serialize)]
struct DebugSnapshot<'a> {
    tuning: &'a ControllerTuning,
    telemetry: &'a CharacterTelemetry,
    player: Option<PlayerReadout>,
}

pub(crate) fn snapshot_json(
    tuning: &ControllerTuning,
    telemetry: &CharacterTelemetry,
    player: Option<PlayerReadout>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DebugSnapshot {
        tuning,
        telemetry,
        player,
    })
}

pub(crate) fn info_text(
    tuning: &ControllerTuning,
    telemetry: &CharacterTelemetry,
    player: Option<PlayerReadout>,
) -> String {
    let pos = telemetry.position();
    let (animation, jumps) = match player {
        Some(readout) => (readout.animation.clip_name(), readout.jumps.to_string()),
        None => ("-", "-".to_string()),
    };
    format!(
        "Pos: ({:.2}, {:.2}, {:.2})\nYaw: {:.1} deg\nAnim: {}\nJumps: {}\nWalk: {}\nRun: {}\nTurn: {}",
        pos.x,
        pos.y,
        pos.z,
        telemetry.container_yaw.to_degrees(),
        animation,
        jumps,
        TuningParam::WalkSpeed.display(tuning.walk_speed),
        TuningParam::RunSpeed.display(tuning.run_speed),
        TuningParam::RotationSpeed.display(tuning.rotation_speed),
    )
}

/// Apply a panel action. Returns true when the panel needs a rebuild.
pub(crate) fn perform_action(
    action: DebugAction,
    debug_state: &mut DebugState,
    tuning: &mut ControllerTuning,
    telemetry: &CharacterTelemetry,
    player: Option<PlayerReadout>,
) -> bool {
    match action {
        DebugAction::Adjust(param, steps) => {
            let value = param.nudge(tuning.get(param), steps);
            tuning.set(param, value);
            debug_state.selected = param;
            let msg = format!("{}: {}", param.label(), param.display(value));
            info!("[DEBUG] {}", msg);
            debug_state.set_message(msg, MESSAGE_SECONDS);
            true
        }
        DebugAction::ToggleInfo => {
            debug_state.show_info = !debug_state.show_info;
            let msg = if debug_state.show_info {
                "Debug Info ON"
            } else {
                "Debug Info OFF"
            };
            debug_state.set_message(msg, MESSAGE_SECONDS);
            info!("[DEBUG] {}", msg);
            false
        }
        DebugAction::ExportSnapshot => {
            match snapshot_json(tuning, telemetry, player) {
                Ok(json) => {
                    info!("[DEBUG] Controller snapshot:\n{}", json);
                    debug_state.set_message("Snapshot logged", MESSAGE_SECONDS);
                }
                Err(e) => {
                    warn!("[DEBUG] Failed to serialize snapshot: {}", e);
                    debug_state.set_message("Snapshot failed", MESSAGE_SECONDS);
                }
            }
            false
        }
        DebugAction::Close => {
            debug_state.ui_visible = false;
            true
        }
    }
}

fn player_readout(
    player_query: &Query<(&CharacterState, &CharacterAnimation), With<Player>>,
) -> Option<PlayerReadout> {
    player_query
        .single()
        .ok()
        .map(|(state, animation)| PlayerReadout {
            animation: animation.current,
            jumps: state.jumps.count(),
        })
}

/// Toggle debug UI with F1 or backtick key
pub(crate) fn toggle_debug_ui(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    tuning: Res<ControllerTuning>,
    existing_ui: Query<Entity, With<DebugUI>>,
) {
    let toggle = keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote);

    if toggle {
        debug_state.ui_visible = !debug_state.ui_visible;

        if debug_state.ui_visible {
            spawn_debug_ui(&mut commands, &debug_state, &tuning);
        } else {
            for entity in &existing_ui {
                commands.entity(entity).despawn();
            }
        }
    }
}

/// Handle keyboard shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut tuning: ResMut<ControllerTuning>,
    telemetry: Res<CharacterTelemetry>,
    player_query: Query<(&CharacterState, &CharacterAnimation), With<Player>>,
    existing_ui: Query<Entity, With<DebugUI>>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Ctrl+1..3: select the parameter the +/- hotkeys adjust
    let selection = SELECT_KEYS
        .into_iter()
        .zip(TuningParam::ALL)
        .find(|(key, _)| keyboard.just_pressed(*key));
    let mut needs_refresh = false;
    if let Some((_, param)) = selection {
        debug_state.selected = param;
        debug_state.set_message(format!("Selected {}", param.label()), MESSAGE_SECONDS);
        needs_refresh = true;
    }

    let mut actions = Vec::new();
    if keyboard.just_pressed(INCREASE_KEY) {
        actions.push(DebugAction::Adjust(debug_state.selected, 1));
    }
    if keyboard.just_pressed(DECREASE_KEY) {
        actions.push(DebugAction::Adjust(debug_state.selected, -1));
    }
    if keyboard.just_pressed(INFO_KEY) {
        actions.push(DebugAction::ToggleInfo);
    }
    if keyboard.just_pressed(SNAPSHOT_KEY) {
        actions.push(DebugAction::ExportSnapshot);
    }

    let player = player_readout(&player_query);
    for action in actions {
        needs_refresh |= perform_action(action, &mut debug_state, &mut tuning, &telemetry, player);
    }

    if needs_refresh {
        refresh_debug_ui(&mut commands, &debug_state, &tuning, &existing_ui);
    }
}

/// Handle button clicks in debug UI
pub(crate) fn handle_debug_buttons(
    mut commands: Commands,
    mut debug_state: ResMut<DebugState>,
    mut tuning: ResMut<ControllerTuning>,
    telemetry: Res<CharacterTelemetry>,
    button_query: Query<(&DebugButton, &Interaction), Changed<Interaction>>,
    player_query: Query<(&CharacterState, &CharacterAnimation), With<Player>>,
    existing_ui: Query<Entity, With<DebugUI>>,
) {
    let player = player_readout(&player_query);
    let mut needs_refresh = false;
    for (button, interaction) in &button_query {
        if *interaction != Interaction::Pressed {
            continue;
        }

        needs_refresh |=
            perform_action(button.action, &mut debug_state, &mut tuning, &telemetry, player);
    }

    // Rebuild once; buttons pressed this frame belong to the old panel
    if needs_refresh {
        refresh_debug_ui(&mut commands, &debug_state, &tuning, &existing_ui);
    }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    mut status_text: Query<&mut Text, With<DebugStatusMessage>>,
) {
    debug_state.tick_message(time.delta_secs());

    let message = debug_state
        .status_message
        .as_ref()
        .map(|(message, _)| message.as_str())
        .unwrap_or("");
    for mut text in &mut status_text {
        if text.0 != message {
            **text = message.to_string();
        }
    }
}

/// Keep the info overlay in sync with `show_info` and the live values
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    tuning: Res<ControllerTuning>,
    telemetry: Res<CharacterTelemetry>,
    player_query: Query<(&CharacterState, &CharacterAnimation), With<Player>>,
    mut overlay_query: Query<(Entity, &mut Text), With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for (entity, _) in &overlay_query {
            commands.entity(entity).despawn();
        }
        return;
    }

    if overlay_query.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    let text = info_text(&tuning, &telemetry, player_readout(&player_query));
    for (_, mut overlay) in &mut overlay_query {
        **overlay = text.clone();
    }
}
