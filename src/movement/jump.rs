//! Movement domain: bounded double-jump counter.

/// Jumps allowed between two ground contacts (ground jump + one air jump).
pub const MAX_JUMPS: u8 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpCounter {
    count: u8,
}

impl JumpCounter {
    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn can_jump(&self) -> bool {
        self.count < MAX_JUMPS
    }

    /// Reset the counter when the body rests at or below the ground threshold
    /// and is not moving up. Returns whether the body counts as grounded.
    pub fn reset_if_grounded(&mut self, height: f32, vertical_velocity: f32, threshold: f32) -> bool {
        let grounded = height <= threshold && vertical_velocity <= 0.0;
        if grounded {
            self.count = 0;
        }
        grounded
    }

    /// Spend a jump if the action is held and one is left.
    ///
    /// Level-triggered: holding the button keeps requesting jumps, so both
    /// jumps can go out on consecutive frames.
    pub fn try_jump(&mut self, jump_held: bool) -> bool {
        if jump_held && self.can_jump() {
            self.count += 1;
            true
        } else {
            false
        }
    }
}
