//! Radar Engine
//!
//! Runs the sensor one tick at a time:
//!
//! 1. advance the sweep
//! 2. evaluate every target against the new beam position
//! 3. apply the whole verdict batch to the blip store
//! 4. apply sweep-complete transitions if the sweep wrapped
//! 5. publish a fresh snapshot
//!
//! Readers holding a [`SnapshotHandle`] only ever see the result of step 5.

use std::sync::Arc;

use crate::blips::{ApplyStats, BlipStore, SweepTransitions};
use crate::config::SensorConfig;
use crate::detection::{DetectionEngine, Verdict};
use crate::error::MalformedTarget;
use crate::geometry::Beam;
use crate::snapshot::{BlipSnapshot, BlipView, SnapshotHandle};
use crate::sweep::SweepController;
use crate::target::{Target, TargetId};

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub beam_angle: f64,
    /// Targets with a positive detection
    pub detected: usize,
    /// Targets inside the beam without a detection
    pub missed: usize,
    /// Targets ignored because of bad data
    pub skipped: Vec<(TargetId, MalformedTarget)>,
    pub applied: ApplyStats,
    /// Sweeps completed during this tick
    pub sweeps_completed: u32,
    pub transitions: SweepTransitions,
}

pub struct RadarEngine {
    config: Arc<SensorConfig>,
    sweep: SweepController,
    detector: DetectionEngine,
    store: BlipStore,
    tick: u64,
    published: SnapshotHandle,
}

impl RadarEngine {
    pub fn new(config: SensorConfig) -> Self {
        let config = Arc::new(config);
        RadarEngine {
            sweep: SweepController::new(config.sweep_speed(), config.beamwidth()),
            detector: DetectionEngine::new(config.clone()),
            store: BlipStore::new(),
            tick: 0,
            published: SnapshotHandle::new(),
            config,
        }
    }

    /// See [`DetectionEngine::with_parallel_threshold`]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.detector = self.detector.with_parallel_threshold(threshold);
        self
    }

    /// Run a single tick
    pub fn tick(&mut self, targets: &[Target]) -> TickReport {
        self.advance(targets, 1)
    }

    /// Advance the beam by `delta_ticks` and evaluate the targets once at the new angle
    ///
    /// When the advance completes more than one sweep, only the first one
    /// ages blips; the later ones passed without any evaluation.
    pub fn advance(&mut self, targets: &[Target], delta_ticks: u32) -> TickReport {
        let progress = self.sweep.advance(delta_ticks);
        self.tick += u64::from(delta_ticks);

        let beam = self.sweep.beam();
        let verdicts = self.detector.evaluate_all(targets, &beam);

        let mut report = TickReport {
            tick: self.tick,
            beam_angle: progress.angle,
            sweeps_completed: progress.completed,
            ..Default::default()
        };

        for (id, verdict) in &verdicts {
            match verdict {
                Verdict::Detected(_) => report.detected += 1,
                Verdict::NotDetected(_) => report.missed += 1,
                Verdict::Skipped(reason) => {
                    log::warn!("{}: skipping target: {}", id, reason);
                    report.skipped.push((*id, *reason));
                }
            }
        }

        report.applied = self.store.apply(self.tick, &verdicts);

        for _ in 0..progress.completed {
            let transitions = self.store.complete_sweep(self.tick);
            log::debug!(
                "Sweep {} complete at tick {}: {} promoted, {} stale, {} removed",
                self.sweep.sweeps_completed(),
                self.tick,
                transitions.promoted,
                transitions.staled,
                transitions.removed
            );
            report.transitions.merge(transitions);
        }

        self.publish();
        report
    }

    fn publish(&self) {
        let blips = self
            .store
            .iter_active()
            .map(|b| BlipView::from_blip(b, &self.config))
            .collect();

        self.published.publish(BlipSnapshot {
            tick: self.tick,
            sweeps_completed: self.sweep.sweeps_completed(),
            beam_angle: self.sweep.angle(),
            blips,
        });
    }

    /// Latest published snapshot of committed and stale blips
    pub fn active_blips(&self) -> Arc<BlipSnapshot> {
        self.published.load()
    }

    /// Handle for reading snapshots from other threads
    pub fn snapshot_handle(&self) -> SnapshotHandle {
        self.published.clone()
    }

    /// Cross-section implied by a blip's last return, if the blip exists
    pub fn estimated_rcs(&self, id: TargetId) -> Option<f64> {
        self.store
            .get(id)
            .map(|b| self.config.estimate_rcs(b.received_power, b.distance))
    }

    pub fn beam(&self) -> Beam {
        self.sweep.beam()
    }

    pub fn sweep(&self) -> &SweepController {
        &self.sweep
    }

    pub fn blips(&self) -> &BlipStore {
        &self.store
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Ticks elapsed since construction
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}
