//! Simulated target motion
//!
//! Straight-line motion at constant heading and speed, wrapping around the
//! field edges, plus random aircraft arriving over time. The radar core only
//! ever sees the resulting [`Target`] list.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sweepradar_core::{Position, Target, TargetId, TargetKind};

use crate::settings::{SimulationSettings, TargetSpec};

/// km/h to distance units per tick: 1 unit is 1 km, 60 ticks per second
pub const SPEED_SCALING_FACTOR: f64 = 1.0 / 60.0;

/// A target together with its motion
#[derive(Debug, Clone)]
pub struct MovingTarget {
    pub target: Target,
    /// Distance units per tick
    pub speed: f64,
    pub heading_deg: f64,
}

impl MovingTarget {
    pub fn new(target: Target, speed_kmph: f64, heading_deg: f64) -> Self {
        MovingTarget {
            target,
            speed: speed_kmph * SPEED_SCALING_FACTOR,
            heading_deg,
        }
    }

    /// Move one tick along the heading, wrapping at the field edges
    pub fn step(&mut self, field_size: [f64; 2]) {
        let heading = self.heading_deg.to_radians();
        let p = &mut self.target.position;
        p.x = (p.x + self.speed * heading.cos()).rem_euclid(field_size[0]);
        p.y = (p.y + self.speed * heading.sin()).rem_euclid(field_size[1]);
    }
}

/// All targets in the simulated world
pub struct TargetField {
    targets: Vec<MovingTarget>,
    next_id: u32,
    size: [f64; 2],
    spawn_probability: f64,
    max_targets: usize,
    rng: ChaCha8Rng,
}

impl TargetField {
    pub fn new(settings: &SimulationSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut field = TargetField {
            targets: Vec::new(),
            next_id: 1,
            size: settings.field_size,
            spawn_probability: settings.spawn_probability,
            max_targets: settings.max_targets,
            rng,
        };
        for spec in &settings.initial_targets {
            field.add(spec);
        }
        field
    }

    /// Add a target, filling gaps in the spec from the kind defaults
    pub fn add(&mut self, spec: &TargetSpec) -> TargetId {
        let defaults = spec.kind.defaults();
        let position = match spec.position {
            Some([x, y]) => Position::new(x, y),
            None => self.random_position(),
        };

        let id = TargetId(self.next_id);
        self.next_id += 1;

        let target = Target {
            id,
            position,
            rcs: spec.rcs.unwrap_or(defaults.rcs),
            jamming_power: spec.jamming_power,
            kind: spec.kind,
        };
        self.targets.push(MovingTarget::new(
            target,
            spec.speed_kmph.unwrap_or(defaults.speed_kmph),
            spec.heading_deg.unwrap_or(defaults.heading_deg),
        ));
        id
    }

    /// Position away from the field edges, like the inner 3/4 of the field
    fn random_position(&mut self) -> Position {
        let [w, h] = self.size;
        Position::new(
            self.rng.gen_range(w / 8.0..=w * 7.0 / 8.0),
            self.rng.gen_range(h / 8.0..=h * 7.0 / 8.0),
        )
    }

    /// Move every target one tick, then maybe spawn a new aircraft
    pub fn step(&mut self) -> Option<TargetId> {
        for t in &mut self.targets {
            t.step(self.size);
        }

        if self.targets.len() < self.max_targets && self.rng.gen::<f64>() < self.spawn_probability
        {
            let spec = TargetSpec::new(
                TargetKind::Aircraft,
                self.rng.gen_range(100..=300) as f64,
                self.rng.gen_range(0..360) as f64,
                self.rng.gen_range(1..=10) as f64,
            );
            let id = self.add(&spec);
            log::debug!("Spawned aircraft {}", id);
            return Some(id);
        }
        None
    }

    /// Current targets as seen by the sensor
    pub fn targets(&self) -> Vec<Target> {
        self.targets.iter().map(|t| t.target.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
