//! Per-tick target evaluation

use rayon::prelude::*;
use std::sync::Arc;

use super::verdict::{Detection, MissReason, Verdict};
use crate::config::SensorConfig;
use crate::geometry::{angle_to, Beam};
use crate::signal;
use crate::target::{Target, TargetId};

/// Target count at which evaluation moves onto the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Evaluates targets against the beam and the signal model
///
/// Stateless apart from the shared configuration, so one tick's targets can
/// be evaluated in any order or in parallel.
#[derive(Debug, Clone)]
pub struct DetectionEngine {
    config: Arc<SensorConfig>,
    parallel_threshold: usize,
}

impl DetectionEngine {
    pub fn new(config: Arc<SensorConfig>) -> Self {
        DetectionEngine {
            config,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Evaluate in parallel once at least `threshold` targets are present
    ///
    /// `usize::MAX` keeps evaluation on the calling thread.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Evaluate one target; `None` when the beam does not cover it
    pub fn evaluate(&self, target: &Target, beam: &Beam) -> Option<Verdict> {
        if let Err(reason) = target.validate() {
            return Some(Verdict::Skipped(reason));
        }

        let center = self.config.center();
        if !beam.contains(angle_to(&center, &target.position)) {
            return None;
        }

        let distance = nalgebra::distance(&center, &target.position);
        if distance == 0.0 {
            return Some(Verdict::NotDetected(MissReason::ZeroDistance));
        }
        if distance > self.config.range() {
            return Some(Verdict::NotDetected(MissReason::OutOfRange));
        }

        let mut power = self.config.received_power(target.rcs, distance);
        if target.jamming_power > 0.0 {
            power = signal::jamming_attenuation(power, target.jamming_power);
        }
        if power <= 0.0 {
            return Some(Verdict::NotDetected(MissReason::NoReturn));
        }

        let snr_db = match signal::snr_db(power, self.config.noise_power()) {
            Ok(snr) => snr,
            Err(_) => return Some(Verdict::NotDetected(MissReason::NoReturn)),
        };
        if let Some(threshold) = self.config.min_snr_db() {
            if snr_db < threshold {
                return Some(Verdict::NotDetected(MissReason::BelowThreshold));
            }
        }

        Some(Verdict::Detected(Detection {
            position: target.position,
            distance,
            power,
            snr_db,
        }))
    }

    /// Evaluate every target, keeping target order
    pub fn evaluate_all(&self, targets: &[Target], beam: &Beam) -> Vec<(TargetId, Verdict)> {
        if targets.len() >= self.parallel_threshold {
            targets
                .par_iter()
                .filter_map(|t| self.evaluate(t, beam).map(|v| (t.id, v)))
                .collect()
        } else {
            targets
                .iter()
                .filter_map(|t| self.evaluate(t, beam).map(|v| (t.id, v)))
                .collect()
        }
    }
}
