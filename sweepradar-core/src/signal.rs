//! Radar signal model
//!
//! Pure functions for the monostatic radar equation and friends.
//! The equations take linear magnitudes; dB values are converted once, when
//! the sensor configuration is built.

use std::f64::consts::PI;

use crate::error::SignalError;

/// Speed of light in m/s
pub const SPEED_OF_LIGHT: f64 = 3e8;

/// Boltzmann constant in J/K
pub const BOLTZMANN: f64 = 1.38e-23;

/// Standard noise reference temperature in K
pub const REFERENCE_TEMPERATURE: f64 = 290.0;

// =============================================================================
// Unit conversion
// =============================================================================

/// Carrier wavelength in meters for a frequency in Hz
#[inline]
pub fn wavelength(frequency: f64) -> f64 {
    SPEED_OF_LIGHT / frequency
}

/// Convert a dB value to a linear power ratio
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

/// Convert a linear power ratio to dB
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}

// =============================================================================
// Propagation
// =============================================================================

/// Free-space path loss `(4π·d/λ)²` as a linear factor
///
/// Returns `+∞` for a non-positive distance.
pub fn path_loss(distance: f64, frequency: f64) -> f64 {
    if distance <= 0.0 {
        return f64::INFINITY;
    }
    let ratio = 4.0 * PI * distance / wavelength(frequency);
    ratio * ratio
}

/// Received power from the monostatic radar equation
///
/// `pt·Gt·Gr·λ²·σ / ((4π)³·d⁴)`
///
/// # Arguments
/// * `pt` - Transmit power in W
/// * `gain_tx` - Linear transmit antenna gain
/// * `gain_rx` - Linear receive antenna gain
/// * `wavelength` - Carrier wavelength in m
/// * `rcs` - Radar cross-section in m²
/// * `distance` - Distance to the target
///
/// Returns 0 for a non-positive distance. Envelope checks against the
/// sensor range are done by [`SensorConfig::received_power`](crate::SensorConfig::received_power).
pub fn received_power(
    pt: f64,
    gain_tx: f64,
    gain_rx: f64,
    wavelength: f64,
    rcs: f64,
    distance: f64,
) -> f64 {
    if distance <= 0.0 {
        return 0.0;
    }
    let d2 = distance * distance;
    (pt * gain_tx * gain_rx * wavelength * wavelength * rcs) / ((4.0 * PI).powi(3) * d2 * d2)
}

/// Thermal noise power `k·(F·T0 + T0)·B`
pub fn noise_power(noise_figure_linear: f64, k: f64, t0: f64, bandwidth: f64) -> f64 {
    k * (noise_figure_linear * t0 + t0) * bandwidth
}

/// Signal-to-noise ratio in dB
pub fn snr_db(signal_power: f64, noise_power: f64) -> Result<f64, SignalError> {
    if !(signal_power > 0.0) {
        return Err(SignalError::NonPositiveSignal);
    }
    if !(noise_power > 0.0) {
        return Err(SignalError::NonPositiveNoise);
    }
    Ok(linear_to_db(signal_power / noise_power))
}

/// Effective signal power under jamming, `S / (1 + J)`
#[inline]
pub fn jamming_attenuation(signal_power: f64, jamming_power: f64) -> f64 {
    signal_power / (1.0 + jamming_power)
}

/// Doppler frequency shift in Hz for a relative velocity in m/s
///
/// Positive velocity means closing. Undefined at or beyond `c`.
pub fn doppler_shift(relative_velocity: f64, frequency: f64) -> Result<f64, SignalError> {
    if !relative_velocity.is_finite() || relative_velocity.abs() >= SPEED_OF_LIGHT {
        return Err(SignalError::DopplerUndefined);
    }
    let c = SPEED_OF_LIGHT;
    Ok(frequency * (c + relative_velocity) / (c - relative_velocity) - frequency)
}

/// Invert the radar equation for the cross-section that would produce `power`
///
/// Returns 0 when the inputs cannot yield a meaningful estimate.
pub fn estimate_rcs(
    power: f64,
    pt: f64,
    gain_tx: f64,
    gain_rx: f64,
    wavelength: f64,
    distance: f64,
) -> f64 {
    let denominator = pt * gain_tx * gain_rx * wavelength * wavelength;
    if power <= 0.0 || distance <= 0.0 || denominator <= 0.0 {
        return 0.0;
    }
    let d2 = distance * distance;
    power * (4.0 * PI).powi(3) * d2 * d2 / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_eq(a: f64, b: f64, tol: f64) -> bool {
        ((a - b) / b).abs() < tol
    }

    #[test]
    fn test_db_conversion() {
        assert!((db_to_linear(30.0) - 1000.0).abs() < 1e-9);
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_db(100.0) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_wavelength_x_band() {
        assert!((wavelength(10e9) - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_path_loss() {
        // (4π·1/0.03)² at 10 GHz, 1 m
        let expected = (4.0 * PI / 0.03).powi(2);
        assert!(rel_eq(path_loss(1.0, 10e9), expected, 1e-9));
        assert!(path_loss(0.0, 10e9).is_infinite());
        assert!(path_loss(-5.0, 10e9).is_infinite());
    }

    #[test]
    fn test_received_power_reference_scenario() {
        // 30 dB gains on both antennas, 10 GHz, 100 units, 10 m²
        let p = received_power(1.0, 1000.0, 1000.0, 0.03, 10.0, 100.0);
        assert!(rel_eq(p, 4.53e-8, 1e-2), "got {}", p);

        let exact = 1e6 * 9e-4 * 10.0 / ((4.0 * PI).powi(3) * 1e8);
        assert!(rel_eq(p, exact, 1e-9));
    }

    #[test]
    fn test_received_power_decreases_with_distance() {
        let mut previous = f64::INFINITY;
        for d in (1..=300).map(|d| d as f64) {
            let p = received_power(1.0, 1000.0, 1000.0, 0.03, 10.0, d);
            assert!(p > 0.0);
            assert!(p < previous, "not decreasing at distance {}", d);
            previous = p;
        }
    }

    #[test]
    fn test_received_power_zero_distance() {
        assert_eq!(received_power(1.0, 1000.0, 1000.0, 0.03, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_noise_power_positive() {
        let n = noise_power(db_to_linear(3.0), BOLTZMANN, REFERENCE_TEMPERATURE, 1.0);
        assert!(n > 0.0);
        // k·(F·T0 + T0) with F ≈ 1.995
        assert!(rel_eq(n, 1.38e-23 * (1.99526 * 290.0 + 290.0), 1e-4));
    }

    #[test]
    fn test_snr_db() {
        assert!((snr_db(100.0, 1.0).unwrap() - 20.0).abs() < 1e-12);
        assert!((snr_db(1.0, 10.0).unwrap() + 10.0).abs() < 1e-12);
        assert_eq!(snr_db(0.0, 1.0), Err(SignalError::NonPositiveSignal));
        assert_eq!(snr_db(-1.0, 1.0), Err(SignalError::NonPositiveSignal));
        assert_eq!(snr_db(f64::NAN, 1.0), Err(SignalError::NonPositiveSignal));
        assert_eq!(snr_db(1.0, 0.0), Err(SignalError::NonPositiveNoise));
    }

    #[test]
    fn test_jamming() {
        assert_eq!(jamming_attenuation(4.0e-8, 0.0), 4.0e-8);
        assert_eq!(jamming_attenuation(4.0e-8, 1.0), 2.0e-8);
        assert!(jamming_attenuation(4.0e-8, 9.0) < 4.0e-8 / 9.0);
    }

    #[test]
    fn test_doppler_shift() {
        assert_eq!(doppler_shift(0.0, 10e9), Ok(0.0));

        // Closing at 300 m/s: roughly 2·v·f/c = 20 kHz
        let shift = doppler_shift(300.0, 10e9).unwrap();
        assert!(rel_eq(shift, 20_000.0, 1e-5), "got {}", shift);

        let receding = doppler_shift(-300.0, 10e9).unwrap();
        assert!(receding < 0.0);

        assert_eq!(
            doppler_shift(SPEED_OF_LIGHT, 10e9),
            Err(SignalError::DopplerUndefined)
        );
        assert_eq!(
            doppler_shift(f64::INFINITY, 10e9),
            Err(SignalError::DopplerUndefined)
        );
    }

    #[test]
    fn test_estimate_rcs_inverts_radar_equation() {
        let p = received_power(1.0, 1000.0, 1000.0, 0.03, 10.0, 150.0);
        let rcs = estimate_rcs(p, 1.0, 1000.0, 1000.0, 0.03, 150.0);
        assert!(rel_eq(rcs, 10.0, 1e-9));

        assert_eq!(estimate_rcs(0.0, 1.0, 1000.0, 1000.0, 0.03, 150.0), 0.0);
        assert_eq!(estimate_rcs(p, 1.0, 1000.0, 1000.0, 0.03, 0.0), 0.0);
    }
}
