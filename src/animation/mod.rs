//! Animation label selection for the player character.
//!
//! The controller only decides *which* clip should play; loading and
//! blending clips belongs to whatever renders the character.

use bevy::prelude::*;
use serde::Serialize;

use crate::movement::{Gait, MovementVector};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationLabel {
    #[default]
    Idle,
    Walk,
    Run,
    Jump,
}

impl AnimationLabel {
    /// Clip name as the character asset names it.
    pub fn clip_name(self) -> &'static str {
        match self {
            AnimationLabel::Idle => "idle",
            AnimationLabel::Walk => "walk",
            AnimationLabel::Run => "run",
            AnimationLabel::Jump => "jump",
        }
    }
}

/// Pick the locomotion label for this frame. A jump overrides the result
/// separately; nothing here remembers previous frames.
pub fn select_animation(movement: MovementVector, gait: Gait) -> AnimationLabel {
    if movement.is_idle() {
        return AnimationLabel::Idle;
    }
    match gait {
        Gait::Run => AnimationLabel::Run,
        Gait::Walk => AnimationLabel::Walk,
    }
}

/// Label currently requested for the character.
#[derive(Component, Debug, Default)]
pub struct CharacterAnimation {
    pub current: AnimationLabel,
    pub previous: AnimationLabel,
}

impl CharacterAnimation {
    /// Request a label. Returns true when it differs from the current one.
    pub fn set(&mut self, label: AnimationLabel) -> bool {
        if self.current == label {
            return false;
        }
        self.previous = self.current;
        self.current = label;
        true
    }
}

pub struct CharacterAnimationPlugin;

impl Plugin for CharacterAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, log_animation_changes);
    }
}

fn log_animation_changes(query: Query<&CharacterAnimation, Changed<CharacterAnimation>>) {
    for animation in &query {
        if animation.current != animation.previous {
            debug!(
                "Animation: {} -> {}",
                animation.previous.clip_name(),
                animation.current.clip_name()
            );
        }
    }
}
