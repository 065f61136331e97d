//! Content domain: data-driven controller defaults loaded at startup.

mod data;
mod loader;
mod validation;


pub use data::ControllerDefaults;
pub use loader::{CONTROLLER_FILE, ContentLoadError, load_controller_defaults, parse_single};
pub use validation::{ValidationError, validate_controller_defaults};

use bevy::prelude::*;
use std::path::Path;

/// Directory the content files live in, relative to the working directory.
pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_controller_content);
    }
}

/// Load `controller.ron` and install its tuning and rig layout. Any failure
/// keeps the built-in defaults.
fn load_controller_content(mut commands: Commands) {
    let defaults = match load_controller_defaults(Path::new(CONTENT_DIR)) {
        Ok(defaults) => defaults,
        Err(e) => {
            warn!("{}; using built-in controller defaults", e);
            return;
        }
    };

    let errors = validate_controller_defaults(&defaults);
    if !errors.is_empty() {
        for error in &errors {
            warn!("Content validation: {}", error);
        }
        warn!(
            "{} invalid controller field(s); using built-in controller defaults",
            errors.len()
        );
        return;
    }

    info!(
        "Loaded controller content: walk={}, run={}, rotation={}deg, jump={}",
        defaults.walk_speed,
        defaults.run_speed,
        defaults.rotation_speed_degrees,
        defaults.jump_impulse
    );

    commands.insert_resource(defaults.tuning());
    commands.insert_resource(defaults.rig_layout());
}
