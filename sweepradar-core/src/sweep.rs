//! Sweep Controller
//!
//! Rotates the beam and decides when a full sweep has been completed.
//!
//! A sweep completes on the tick where the degrees accumulated since the
//! previous completion reach 360. The remainder is carried into the next
//! sweep so cycle lengths stay exact when the speed does not divide 360.

use serde::{Deserialize, Serialize};

use crate::geometry::{normalize_degrees, Beam};

const FULL_CIRCLE: f64 = 360.0;

/// Rounding slack when summing fractional speeds
const COMPLETION_EPSILON: f64 = 1e-9;

/// Result of advancing the sweep
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepProgress {
    /// Beam angle after the advance
    pub angle: f64,
    /// Number of sweeps completed by this advance
    pub completed: u32,
}

impl SweepProgress {
    pub fn is_complete(&self) -> bool {
        self.completed > 0
    }
}

#[derive(Debug, Clone)]
pub struct SweepController {
    angle: f64,
    speed: f64,
    beamwidth: f64,
    /// Degrees advanced since the last completion, always < 360 between advances
    cumulative: f64,
    sweeps_completed: u64,
}

impl SweepController {
    /// Start at 0° with the given speed in degrees per tick
    pub fn new(speed: f64, beamwidth: f64) -> Self {
        SweepController {
            angle: 0.0,
            speed,
            beamwidth,
            cumulative: 0.0,
            sweeps_completed: 0,
        }
    }

    /// Advance the beam by `delta_ticks` ticks
    pub fn advance(&mut self, delta_ticks: u32) -> SweepProgress {
        self.cumulative += self.speed * delta_ticks as f64;

        let mut completed = 0;
        if self.cumulative + COMPLETION_EPSILON >= FULL_CIRCLE {
            completed = ((self.cumulative + COMPLETION_EPSILON) / FULL_CIRCLE).floor() as u32;
            // Sums like 300 × 1.2 land just short of 360; snap those to 0
            self.cumulative = (self.cumulative - completed as f64 * FULL_CIRCLE).max(0.0);
            if self.cumulative < COMPLETION_EPSILON {
                self.cumulative = 0.0;
            }
            self.sweeps_completed += completed as u64;
        }
        // Angle and remainder are both the total rotation modulo 360
        self.angle = normalize_degrees(self.cumulative);

        SweepProgress {
            angle: self.angle,
            completed,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Degrees covered so far in the current sweep
    pub fn progress_degrees(&self) -> f64 {
        self.cumulative
    }

    pub fn sweeps_completed(&self) -> u64 {
        self.sweeps_completed
    }

    pub fn beam(&self) -> Beam {
        Beam::new(self.angle, self.beamwidth)
    }
}
