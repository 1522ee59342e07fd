//! Blip Store
//!
//! Owns every blip and applies verdict batches and sweep-complete events.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::detection::{Detection, Verdict};
use crate::target::TargetId;
use crate::Position;

/// Lifecycle state of a blip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlipState {
    /// Detected, not yet confirmed by a sweep completion
    Pending,
    /// Confirmed and seen during the most recent sweep
    Committed,
    /// Confirmed, but missed during the most recent full sweep
    Stale,
}

impl BlipState {
    /// Whether the renderer gets to see blips in this state
    pub fn is_active(self) -> bool {
        matches!(self, BlipState::Committed | BlipState::Stale)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlipState::Pending => "pending",
            BlipState::Committed => "committed",
            BlipState::Stale => "stale",
        }
    }
}

/// The sensor's belief about one target
#[derive(Debug, Clone, PartialEq)]
pub struct Blip {
    pub id: TargetId,
    /// Position at the last detection
    pub position: Position,
    pub distance: f64,
    /// Received power at the last detection, W
    pub received_power: f64,
    pub snr_db: f64,
    pub state: BlipState,
    pub first_detected_tick: u64,
    pub last_detected_tick: u64,
}

impl Blip {
    fn new(id: TargetId, tick: u64, detection: &Detection) -> Self {
        Blip {
            id,
            position: detection.position,
            distance: detection.distance,
            received_power: detection.power,
            snr_db: detection.snr_db,
            state: BlipState::Pending,
            first_detected_tick: tick,
            last_detected_tick: tick,
        }
    }

    fn refresh(&mut self, tick: u64, detection: &Detection) {
        self.position = detection.position;
        self.distance = detection.distance;
        self.received_power = detection.power;
        self.snr_db = detection.snr_db;
        self.last_detected_tick = tick;
    }
}

/// Counts from applying one verdict batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub created: usize,
    pub refreshed: usize,
    pub discarded: usize,
}

/// Counts from one sweep-complete event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepTransitions {
    /// Pending -> Committed
    pub promoted: usize,
    /// Committed -> Stale
    pub staled: usize,
    /// Stale -> removed
    pub removed: usize,
}

impl SweepTransitions {
    pub fn merge(&mut self, other: SweepTransitions) {
        self.promoted += other.promoted;
        self.staled += other.staled;
        self.removed += other.removed;
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlipStore {
    blips: BTreeMap<TargetId, Blip>,
    /// Tick of the previous sweep completion; the current sweep covers later ticks
    sweep_started_at: u64,
}

impl BlipStore {
    pub fn new() -> Self {
        BlipStore::default()
    }

    /// Apply all verdicts of tick `tick`
    pub fn apply(&mut self, tick: u64, verdicts: &[(TargetId, Verdict)]) -> ApplyStats {
        let mut stats = ApplyStats::default();

        for (id, verdict) in verdicts {
            match verdict {
                Verdict::Detected(detection) => match self.blips.get_mut(id) {
                    Some(blip) => {
                        blip.refresh(tick, detection);
                        if blip.state == BlipState::Stale {
                            log::trace!("{}: stale -> committed", id);
                            blip.state = BlipState::Committed;
                        }
                        stats.refreshed += 1;
                    }
                    None => {
                        log::trace!("{}: new pending blip at {:.1}", id, detection.distance);
                        self.blips.insert(*id, Blip::new(*id, tick, detection));
                        stats.created += 1;
                    }
                },
                Verdict::NotDetected(reason) => {
                    if self
                        .blips
                        .get(id)
                        .is_some_and(|b| b.state == BlipState::Pending)
                    {
                        log::trace!("{}: pending blip discarded ({:?})", id, reason);
                        self.blips.remove(id);
                        stats.discarded += 1;
                    }
                }
                Verdict::Skipped(_) => {}
            }
        }

        stats
    }

    /// Apply a sweep-complete event that happened on `tick`
    ///
    /// The completed sweep covers the ticks after the previous completion up
    /// to and including `tick`. A sweep covering no ticks, as when one
    /// multi-tick advance completes several sweeps, observed nothing and
    /// does not age blips.
    pub fn complete_sweep(&mut self, tick: u64) -> SweepTransitions {
        let mut transitions = SweepTransitions::default();
        let started = self.sweep_started_at;
        let observed = tick > started;

        // Stale blips had their grace sweep
        self.blips.retain(|id, blip| {
            if observed && blip.state == BlipState::Stale {
                log::trace!("{}: stale blip removed", id);
                transitions.removed += 1;
                false
            } else {
                true
            }
        });

        for blip in self.blips.values_mut() {
            match blip.state {
                BlipState::Committed if observed && blip.last_detected_tick <= started => {
                    log::trace!("{}: committed -> stale", blip.id);
                    blip.state = BlipState::Stale;
                    transitions.staled += 1;
                }
                BlipState::Pending => {
                    log::trace!("{}: pending -> committed", blip.id);
                    blip.state = BlipState::Committed;
                    transitions.promoted += 1;
                }
                _ => {}
            }
        }

        self.sweep_started_at = tick;
        transitions
    }

    /// Copy of all `Committed` and `Stale` blips, ordered by target id
    pub fn active_blips(&self) -> Vec<Blip> {
        self.iter_active().cloned().collect()
    }

    /// `Committed` and `Stale` blips, ordered by target id
    pub fn iter_active(&self) -> impl Iterator<Item = &Blip> {
        self.blips.values().filter(|b| b.state.is_active())
    }

    pub fn get(&self, id: TargetId) -> Option<&Blip> {
        self.blips.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Blip> {
        self.blips.values()
    }

    pub fn count(&self, state: BlipState) -> usize {
        self.blips.values().filter(|b| b.state == state).count()
    }

    pub fn len(&self) -> usize {
        self.blips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blips.is_empty()
    }

    /// Tick of the last sweep completion, 0 before the first
    pub fn sweep_started_at(&self) -> u64 {
        self.sweep_started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::MissReason;
    use crate::error::MalformedTarget;

    fn detected(id: u32, x: f64) -> (TargetId, Verdict) {
        (
            TargetId(id),
            Verdict::Detected(Detection {
                position: Position::new(x, 0.0),
                distance: x,
                power: 1e-8,
                snr_db: 20.0,
            }),
        )
    }

    fn missed(id: u32) -> (TargetId, Verdict) {
        (TargetId(id), Verdict::NotDetected(MissReason::OutOfRange))
    }

    fn state_of(store: &BlipStore, id: u32) -> Option<BlipState> {
        store.get(TargetId(id)).map(|b| b.state)
    }

    #[test]
    fn test_detection_creates_pending() {
        let mut store = BlipStore::new();
        let stats = store.apply(1, &[detected(1, 50.0)]);
        assert_eq!(stats.created, 1);
        assert_eq!(state_of(&store, 1), Some(BlipState::Pending));
        assert!(store.active_blips().is_empty());
    }

    #[test]
    fn test_pending_refreshed_stays_pending() {
        let mut store = BlipStore::new();
        store.apply(1, &[detected(1, 50.0)]);
        let stats = store.apply(2, &[detected(1, 51.0)]);
        assert_eq!(stats.refreshed, 1);

        let blip = store.get(TargetId(1)).unwrap();
        assert_eq!(blip.state, BlipState::Pending);
        assert_eq!(blip.position.x, 51.0);
        assert_eq!(blip.first_detected_tick, 1);
        assert_eq!(blip.last_detected_tick, 2);
    }

    #[test]
    fn test_pending_discarded_when_missed() {
        let mut store = BlipStore::new();
        store.apply(1, &[detected(1, 50.0)]);
        let stats = store.apply(2, &[missed(1)]);
        assert_eq!(stats.discarded, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_pending_survives_without_verdict() {
        let mut store = BlipStore::new();
        store.apply(1, &[detected(1, 50.0)]);
        store.apply(2, &[]);
        let skipped = (TargetId(1), Verdict::Skipped(MalformedTarget::Rcs(f64::NAN)));
        store.apply(3, &[skipped]);
        assert_eq!(state_of(&store, 1), Some(BlipState::Pending));
    }

    #[test]
    fn test_committed_ignores_miss() {
        let mut store = BlipStore::new();
        store.apply(1, &[detected(1, 50.0)]);
        store.complete_sweep(10);
        store.apply(11, &[missed(1)]);
        assert_eq!(state_of(&store, 1), Some(BlipState::Committed));
    }

    #[test]
    fn test_full_lifecycle() {
        let mut store = BlipStore::new();
        store.apply(5, &[detected(1, 50.0)]);

        let t = store.complete_sweep(36);
        assert_eq!(t.promoted, 1);
        assert_eq!(state_of(&store, 1), Some(BlipState::Committed));
        assert_eq!(store.active_blips().len(), 1);

        let t = store.complete_sweep(72);
        assert_eq!(t.staled, 1);
        assert_eq!(state_of(&store, 1), Some(BlipState::Stale));
        assert_eq!(store.active_blips().len(), 1);

        let t = store.complete_sweep(108);
        assert_eq!(t.removed, 1);
        assert_eq!(state_of(&store, 1), None);
        assert!(store.active_blips().is_empty());
    }

    #[test]
    fn test_stale_redetected_is_committed_again() {
        let mut store = BlipStore::new();
        store.apply(5, &[detected(1, 50.0)]);
        store.complete_sweep(36);
        store.complete_sweep(72);
        assert_eq!(state_of(&store, 1), Some(BlipState::Stale));

        store.apply(80, &[detected(1, 60.0)]);
        assert_eq!(state_of(&store, 1), Some(BlipState::Committed));

        let t = store.complete_sweep(108);
        assert_eq!(t, SweepTransitions::default());
        assert_eq!(state_of(&store, 1), Some(BlipState::Committed));
    }

    #[test]
    fn test_detection_on_completion_tick_counts_for_that_sweep() {
        let mut store = BlipStore::new();
        store.apply(5, &[detected(1, 50.0)]);
        store.complete_sweep(36);

        store.apply(72, &[detected(1, 50.0)]);
        store.complete_sweep(72);
        assert_eq!(state_of(&store, 1), Some(BlipState::Committed));
    }

    #[test]
    fn test_repeated_completion_on_same_tick_does_not_age() {
        let mut store = BlipStore::new();
        store.apply(2, &[detected(2, 20.0)]);
        store.complete_sweep(4);
        store.apply(8, &[detected(1, 50.0), detected(2, 20.0)]);

        let first = store.complete_sweep(8);
        assert_eq!(first.promoted, 1);
        let second = store.complete_sweep(8);
        assert_eq!(second, SweepTransitions::default());
        assert_eq!(state_of(&store, 1), Some(BlipState::Committed));
        assert_eq!(state_of(&store, 2), Some(BlipState::Committed));
    }

    #[test]
    fn test_active_blips_is_a_copy() {
        let mut store = BlipStore::new();
        store.apply(1, &[detected(2, 20.0), detected(1, 10.0)]);
        store.complete_sweep(36);

        let mut active = store.active_blips();
        assert_eq!(active[0].id, TargetId(1));
        assert_eq!(active[1].id, TargetId(2));

        active[0].state = BlipState::Stale;
        assert_eq!(state_of(&store, 1), Some(BlipState::Committed));
    }

    #[test]
    fn test_counts() {
        let mut store = BlipStore::new();
        store.apply(1, &[detected(1, 10.0), detected(2, 20.0)]);
        store.complete_sweep(36);
        store.apply(40, &[detected(3, 30.0), detected(1, 10.0)]);
        store.complete_sweep(72);

        assert_eq!(store.count(BlipState::Committed), 2);
        assert_eq!(store.count(BlipState::Stale), 1);
        assert_eq!(store.count(BlipState::Pending), 0);
        assert_eq!(store.len(), 3);
        assert_eq!(store.sweep_started_at(), 72);
    }
}
