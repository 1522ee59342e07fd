//! Sensor Configuration
//!
//! [`SensorSettings`] holds what a user writes down (dB values, Hz, degrees).
//! [`SensorConfig`] is the validated, immutable form the engine runs on, with
//! wavelength, linear gains and noise power derived once.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::signal::{self, BOLTZMANN, REFERENCE_TEMPERATURE};
use crate::Position;

/// Raw sensor settings in user units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SensorSettings {
    /// Sensor position
    pub center: [f64; 2],

    /// Maximum detection range, same units as target positions
    pub range: f64,

    /// Full beamwidth in degrees
    pub beamwidth: f64,

    /// Beam rotation per tick in degrees
    pub sweep_speed: f64,

    /// Transmit power in W
    pub transmit_power: f64,

    /// Transmit antenna gain in dB
    pub tx_gain_db: f64,

    /// Receive antenna gain in dB
    pub rx_gain_db: f64,

    /// Carrier frequency in Hz
    pub frequency: f64,

    /// Receiver noise figure in dB
    pub noise_figure_db: f64,

    /// Noise reference temperature in K
    pub noise_temperature: f64,

    /// Receiver bandwidth in Hz
    pub bandwidth: f64,

    /// Minimum SNR for a detection; any positive return counts when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_snr_db: Option<f64>,
}

impl Default for SensorSettings {
    fn default() -> Self {
        SensorSettings {
            center: [400.0, 400.0],
            range: 300.0,
            beamwidth: 45.0,
            sweep_speed: 1.0,
            transmit_power: 1.0,
            tx_gain_db: 30.0,
            rx_gain_db: 30.0,
            frequency: 10e9,
            noise_figure_db: 3.0,
            noise_temperature: REFERENCE_TEMPERATURE,
            bandwidth: 1.0,
            min_snr_db: None,
        }
    }
}

fn positive(value: f64, err: fn(f64) -> ConfigError) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(err(value))
    }
}

fn finite(value: f64, field: &'static str) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// Validated sensor configuration
///
/// Cannot be built in an invalid state and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorConfig {
    center: Position,
    range: f64,
    beamwidth: f64,
    sweep_speed: f64,
    transmit_power: f64,
    gain_tx: f64,
    gain_rx: f64,
    frequency: f64,
    wavelength: f64,
    noise_figure: f64,
    noise_temperature: f64,
    bandwidth: f64,
    noise_power: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_snr_db: Option<f64>,
}

impl SensorConfig {
    /// Validate settings and derive the constant quantities
    pub fn new(settings: SensorSettings) -> Result<Self, ConfigError> {
        let cx = finite(settings.center[0], "center.x")?;
        let cy = finite(settings.center[1], "center.y")?;
        let range = positive(settings.range, ConfigError::InvalidRange)?;

        let beamwidth = settings.beamwidth;
        if !(beamwidth > 0.0 && beamwidth <= 360.0) {
            return Err(ConfigError::InvalidBeamwidth(beamwidth));
        }

        let sweep_speed = positive(settings.sweep_speed, ConfigError::InvalidSweepSpeed)?;
        let transmit_power = positive(settings.transmit_power, ConfigError::InvalidTransmitPower)?;
        let frequency = positive(settings.frequency, ConfigError::InvalidFrequency)?;
        let noise_temperature =
            positive(settings.noise_temperature, ConfigError::InvalidTemperature)?;
        let bandwidth = positive(settings.bandwidth, ConfigError::InvalidBandwidth)?;
        let tx_gain_db = finite(settings.tx_gain_db, "txGainDb")?;
        let rx_gain_db = finite(settings.rx_gain_db, "rxGainDb")?;
        let noise_figure_db = finite(settings.noise_figure_db, "noiseFigureDb")?;
        let min_snr_db = settings
            .min_snr_db
            .map(|v| finite(v, "minSnrDb"))
            .transpose()?;

        let noise_figure = signal::db_to_linear(noise_figure_db);

        Ok(SensorConfig {
            center: Position::new(cx, cy),
            range,
            beamwidth,
            sweep_speed,
            transmit_power,
            gain_tx: signal::db_to_linear(tx_gain_db),
            gain_rx: signal::db_to_linear(rx_gain_db),
            frequency,
            wavelength: signal::wavelength(frequency),
            noise_figure,
            noise_temperature,
            bandwidth,
            noise_power: signal::noise_power(noise_figure, BOLTZMANN, noise_temperature, bandwidth),
            min_snr_db,
        })
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn beamwidth(&self) -> f64 {
        self.beamwidth
    }

    pub fn sweep_speed(&self) -> f64 {
        self.sweep_speed
    }

    pub fn transmit_power(&self) -> f64 {
        self.transmit_power
    }

    /// Linear transmit gain
    pub fn gain_tx(&self) -> f64 {
        self.gain_tx
    }

    /// Linear receive gain
    pub fn gain_rx(&self) -> f64 {
        self.gain_rx
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Linear noise figure
    pub fn noise_figure(&self) -> f64 {
        self.noise_figure
    }

    /// Receiver noise power in W
    pub fn noise_power(&self) -> f64 {
        self.noise_power
    }

    pub fn min_snr_db(&self) -> Option<f64> {
        self.min_snr_db
    }

    /// Received power for a target of `rcs` at `distance`
    ///
    /// 0 outside the sensor envelope (`distance == 0` or beyond range).
    pub fn received_power(&self, rcs: f64, distance: f64) -> f64 {
        if distance <= 0.0 || distance > self.range {
            return 0.0;
        }
        signal::received_power(
            self.transmit_power,
            self.gain_tx,
            self.gain_rx,
            self.wavelength,
            rcs,
            distance,
        )
    }

    /// Cross-section that would return `power` from `distance`
    pub fn estimate_rcs(&self, power: f64, distance: f64) -> f64 {
        signal::estimate_rcs(
            power,
            self.transmit_power,
            self.gain_tx,
            self.gain_rx,
            self.wavelength,
            distance,
        )
    }
}
