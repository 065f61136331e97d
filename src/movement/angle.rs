//! Movement domain: angle wrapping and shortest-path yaw interpolation.

use std::f32::consts::{PI, TAU};

/// Magnitude above which the angle is reduced with `%` before the wrap loop.
const LOOP_REDUCTION_LIMIT: f32 = 8.0 * TAU;

/// Wrap an angle into (-PI, PI].
///
/// Non-finite input is returned unchanged.
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }

    let mut angle = if angle.abs() > LOOP_REDUCTION_LIMIT {
        angle % TAU
    } else {
        angle
    };

    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Interpolate between two angles along the shorter arc.
///
/// Both ends are wrapped first; when they are more than half a turn apart the
/// smaller one is shifted up by a full turn so the numeric difference follows
/// the short way around. The result is wrapped again.
pub fn lerp_angle(start: f32, end: f32, t: f32) -> f32 {
    let mut start = normalize_angle(start);
    let mut end = normalize_angle(end);

    if (end - start).abs() > PI {
        if end > start {
            start += TAU;
        } else {
            end += TAU;
        }
    }

    normalize_angle(start + (end - start) * t)
}
