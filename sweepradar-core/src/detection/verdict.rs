//! Detection verdicts

use crate::error::MalformedTarget;
use crate::Position;

/// A positive detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub position: Position,
    pub distance: f64,
    /// Received power in W, after jamming
    pub power: f64,
    pub snr_db: f64,
}

/// Why an illuminated target was not detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    /// Target sits on the sensor position
    ZeroDistance,
    /// Beyond the maximum range
    OutOfRange,
    /// Radar equation produced no power
    NoReturn,
    /// Return below the configured SNR threshold
    BelowThreshold,
}

/// Outcome for one target in one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Detected(Detection),
    NotDetected(MissReason),
    Skipped(MalformedTarget),
}

impl Verdict {
    pub fn is_detected(&self) -> bool {
        matches!(self, Verdict::Detected(_))
    }

    pub fn detection(&self) -> Option<&Detection> {
        match self {
            Verdict::Detected(d) => Some(d),
            _ => None,
        }
    }
}
