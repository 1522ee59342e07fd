//! Beam Geometry
//!
//! Angles are in degrees, measured counter-clockwise from the +x axis
//! in the sensor's coordinate frame and normalized into [0, 360).

use serde::{Deserialize, Serialize};

use crate::Position;

/// Normalize an angle into [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Bearing from `center` to `point` in degrees, normalized into [0, 360)
pub fn angle_to(center: &Position, point: &Position) -> f64 {
    let dy = point.y - center.y;
    let dx = point.x - center.x;
    normalize_degrees(dy.atan2(dx).to_degrees())
}

/// Check whether `target_angle` lies inside a beam of `beamwidth` centered on `beam_angle`
///
/// Handles a beam straddling 0°/360°. Both edges are inclusive.
pub fn is_within_beam(beam_angle: f64, beamwidth: f64, target_angle: f64) -> bool {
    let half = beamwidth / 2.0;
    let start = normalize_degrees(beam_angle - half);
    let end = normalize_degrees(beam_angle + half);

    if start < end {
        start <= target_angle && target_angle <= end
    } else {
        target_angle >= start || target_angle <= end
    }
}

/// The radar beam at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beam {
    /// Center angle in degrees, [0, 360)
    pub angle: f64,
    /// Full beamwidth in degrees
    pub width: f64,
}

impl Beam {
    pub fn new(angle: f64, width: f64) -> Self {
        Beam {
            angle: normalize_degrees(angle),
            width,
        }
    }

    /// Trailing edge, [0, 360)
    pub fn start(&self) -> f64 {
        normalize_degrees(self.angle - self.width / 2.0)
    }

    /// Leading edge, [0, 360)
    pub fn end(&self) -> f64 {
        normalize_degrees(self.angle + self.width / 2.0)
    }

    pub fn contains(&self, angle: f64) -> bool {
        is_within_beam(self.angle, self.width, angle)
    }

    /// Check whether the bearing from `center` to `point` is inside the beam
    pub fn illuminates(&self, center: &Position, point: &Position) -> bool {
        self.contains(angle_to(center, point))
    }
}
