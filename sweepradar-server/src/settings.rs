//! Server settings
//!
//! Everything can be left out of the JSON file; missing fields fall back to
//! the defaults below.

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

use sweepradar_core::{SensorSettings, TargetKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    pub sensor: SensorSettings,
    pub simulation: SimulationSettings,
}

/// Settings for the simulated world around the sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationSettings {
    /// Ticks per second
    pub tick_rate: f64,
    /// Width and height of the field targets wrap around in
    pub field_size: [f64; 2],
    /// Chance per tick of a new aircraft appearing
    pub spawn_probability: f64,
    /// No spawning beyond this many live targets
    pub max_targets: usize,
    /// RNG seed; random when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub initial_targets: Vec<TargetSpec>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            tick_rate: 60.0,
            field_size: [800.0, 800.0],
            spawn_probability: 0.05,
            max_targets: 64,
            seed: None,
            initial_targets: vec![
                TargetSpec::new(TargetKind::Aircraft, 180.0, 45.0, 1.0),
                TargetSpec::new(TargetKind::Ship, 10.0, 90.0, 5.0),
                TargetSpec::new(TargetKind::Ship, 15.0, 0.0, 50.0),
            ],
        }
    }
}

/// An initial target; unset values come from the kind's defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpec {
    #[serde(default)]
    pub kind: TargetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_kmph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rcs: Option<f64>,
    /// Random position inside the field when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,
    #[serde(default)]
    pub jamming_power: f64,
}

impl TargetSpec {
    pub fn new(kind: TargetKind, speed_kmph: f64, heading_deg: f64, rcs: f64) -> Self {
        TargetSpec {
            kind,
            speed_kmph: Some(speed_kmph),
            heading_deg: Some(heading_deg),
            rcs: Some(rcs),
            position: None,
            jamming_power: 0.0,
        }
    }
}

impl ServerSettings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings: ServerSettings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the simulation settings; sensor settings are checked by the core
    pub fn validate(&self) -> anyhow::Result<()> {
        let sim = &self.simulation;
        ensure!(
            sim.tick_rate.is_finite() && sim.tick_rate > 0.0,
            "tickRate must be positive, got {}",
            sim.tick_rate
        );
        ensure!(
            (0.0..=1.0).contains(&sim.spawn_probability),
            "spawnProbability must be in [0, 1], got {}",
            sim.spawn_probability
        );
        ensure!(
            sim.field_size.iter().all(|v| v.is_finite() && *v > 0.0),
            "fieldSize must be positive, got {:?}",
            sim.field_size
        );
        Ok(())
    }
}
