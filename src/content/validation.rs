//! Sanity checks for loaded controller content.

use super::data::ControllerDefaults;

/// A validation error naming the offending field.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "controller field '{}' {}", self.field, self.message)
    }
}

/// Helper macro for a strictly positive, finite field
macro_rules! check_positive {
    ($errors:expr, $defaults:expr, $field:ident) => {
        let value = $defaults.$field;
        if !value.is_finite() || value <= 0.0 {
            $errors.push(ValidationError {
                field: stringify!($field),
                message: format!("must be a positive number, got {}", value),
            });
        }
    };
}

/// Validate loaded defaults. Returns a list of errors, empty if usable.
pub fn validate_controller_defaults(defaults: &ControllerDefaults) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_positive!(errors, defaults, walk_speed);
    check_positive!(errors, defaults, run_speed);
    check_positive!(errors, defaults, rotation_speed_degrees);
    check_positive!(errors, defaults, jump_impulse);

    if !defaults.ground_threshold.is_finite() {
        errors.push(ValidationError {
            field: "ground_threshold",
            message: format!("must be finite, got {}", defaults.ground_threshold),
        });
    }

    if !defaults.spawn_height.is_finite() {
        errors.push(ValidationError {
            field: "spawn_height",
            message: format!("must be finite, got {}", defaults.spawn_height),
        });
    }

    let camera = defaults.camera_anchor_offset;
    let look_at = defaults.look_at_anchor_offset;
    let offsets_finite = [camera.0, camera.1, camera.2, look_at.0, look_at.1, look_at.2]
        .iter()
        .all(|v| v.is_finite());
    if !offsets_finite {
        errors.push(ValidationError {
            field: "camera_anchor_offset",
            message: "anchor offsets must be finite".to_string(),
        });
    } else if camera == look_at {
        // The camera would try to look at its own position.
        errors.push(ValidationError {
            field: "look_at_anchor_offset",
            message: "must differ from camera_anchor_offset".to_string(),
        });
    }

    errors
}
