//! Error types
//!
//! Nothing in the core is fatal. Configuration errors stop an engine from
//! being built, everything else is local to one computation or one target.

use thiserror::Error;

/// Rejected sensor configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("range must be positive and finite, got {0}")]
    InvalidRange(f64),

    #[error("beamwidth must be in (0, 360] degrees, got {0}")]
    InvalidBeamwidth(f64),

    #[error("sweep speed must be positive and finite, got {0} deg/tick")]
    InvalidSweepSpeed(f64),

    #[error("transmit power must be positive and finite, got {0} W")]
    InvalidTransmitPower(f64),

    #[error("frequency must be positive and finite, got {0} Hz")]
    InvalidFrequency(f64),

    #[error("noise temperature must be positive and finite, got {0} K")]
    InvalidTemperature(f64),

    #[error("bandwidth must be positive and finite, got {0} Hz")]
    InvalidBandwidth(f64),

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

/// Numerically undefined signal computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignalError {
    /// Logarithm of a zero or negative power ratio
    #[error("signal power must be positive")]
    NonPositiveSignal,

    #[error("noise power must be positive")]
    NonPositiveNoise,

    /// Relative velocity at or beyond the speed of light
    #[error("doppler shift undefined for |v| >= c")]
    DopplerUndefined,
}

/// Reason a target was skipped for a tick
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MalformedTarget {
    #[error("non-finite position ({x}, {y})")]
    Position { x: f64, y: f64 },

    #[error("invalid radar cross-section {0}")]
    Rcs(f64),

    #[error("invalid jamming power {0}")]
    JammingPower(f64),
}
