//! Movement domain: system modules for the controller loop.

pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use input::{sample_frame_input, track_pointer_activity};
pub(crate) use movement::drive_character;
