use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tokio_graceful_shutdown::SubsystemHandle;

use sweepradar_core::{RadarEngine, SensorConfig, SnapshotHandle, TickReport};

use crate::settings::ServerSettings;
use crate::targets::TargetField;

/// The radar engine plus the world it looks at
pub struct Simulation {
    engine: RadarEngine,
    field: TargetField,
    tick_interval: Duration,
    config: Arc<SensorConfig>,
}

impl Simulation {
    pub fn new(settings: &ServerSettings) -> anyhow::Result<Self> {
        settings.validate()?;
        let config = SensorConfig::new(settings.sensor.clone())
            .context("Invalid sensor settings")?;

        log::info!(
            "Sensor at ({}, {}), range {}, beamwidth {}°, {}°/tick",
            config.center().x,
            config.center().y,
            config.range(),
            config.beamwidth(),
            config.sweep_speed()
        );

        Ok(Simulation {
            engine: RadarEngine::new(config.clone()),
            field: TargetField::new(&settings.simulation),
            tick_interval: Duration::from_secs_f64(1.0 / settings.simulation.tick_rate),
            config: Arc::new(config),
        })
    }

    pub fn snapshot_handle(&self) -> SnapshotHandle {
        self.engine.snapshot_handle()
    }

    pub fn config(&self) -> Arc<SensorConfig> {
        self.config.clone()
    }

    pub fn engine(&self) -> &RadarEngine {
        &self.engine
    }

    pub fn field(&self) -> &TargetField {
        &self.field
    }

    /// Run the sensor once on the current targets, then move them
    pub fn step(&mut self) -> TickReport {
        let targets = self.field.targets();
        let report = self.engine.tick(&targets);
        self.field.step();
        report
    }

    pub async fn run(mut self, subsys: SubsystemHandle) -> anyhow::Result<()> {
        let mut ticker = interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        log::debug!("Simulation ticking every {:?}", self.tick_interval);

        loop {
            tokio::select! {
                _ = subsys.on_shutdown_requested() => {
                    log::debug!("Simulation stopped at tick {}", self.engine.tick_count());
                    return Ok(());
                },

                _ = ticker.tick() => {
                    let report = self.step();
                    if report.sweeps_completed > 0 {
                        let snapshot = self.engine.active_blips();
                        log::info!(
                            "Sweep {}: {} blips from {} targets",
                            snapshot.sweeps_completed,
                            snapshot.len(),
                            self.field.len()
                        );
                    }
                },
            }
        }
    }
}
