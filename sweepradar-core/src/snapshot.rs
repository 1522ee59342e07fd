//! Blip Snapshots
//!
//! After every tick the engine publishes an immutable [`BlipSnapshot`] of the
//! active blips. Readers hold an `Arc` to it, so they can keep reading while
//! the next tick is being evaluated and never see half of a tick's updates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::blips::{Blip, BlipState};
use crate::config::SensorConfig;
use crate::target::TargetId;
use crate::Position;

/// One active blip as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlipView {
    pub id: TargetId,
    pub position: Position,
    /// Received power in W
    pub received_power: f64,
    pub snr_db: f64,
    pub state: BlipState,
    /// Cross-section implied by the received power, m²
    pub estimated_rcs: f64,
}

impl BlipView {
    pub fn from_blip(blip: &Blip, config: &SensorConfig) -> Self {
        BlipView {
            id: blip.id,
            position: blip.position,
            received_power: blip.received_power,
            snr_db: blip.snr_db,
            state: blip.state,
            estimated_rcs: config.estimate_rcs(blip.received_power, blip.distance),
        }
    }
}

/// Everything a renderer needs after one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlipSnapshot {
    /// Tick this snapshot was taken after
    pub tick: u64,
    pub sweeps_completed: u64,
    /// Beam center angle in degrees
    pub beam_angle: f64,
    /// Committed and stale blips, ordered by target id
    pub blips: Vec<BlipView>,
}

impl BlipSnapshot {
    pub fn len(&self) -> usize {
        self.blips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blips.is_empty()
    }

    pub fn get(&self, id: TargetId) -> Option<&BlipView> {
        self.blips.iter().find(|b| b.id == id)
    }

    /// Summary for the API
    ///
    /// Returns blip counts per state plus the sweep position.
    pub fn to_summary_map(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        map.insert("tick".to_string(), serde_json::json!(self.tick));
        map.insert(
            "sweepsCompleted".to_string(),
            serde_json::json!(self.sweeps_completed),
        );
        map.insert("beamAngle".to_string(), serde_json::json!(self.beam_angle));

        for state in [BlipState::Committed, BlipState::Stale] {
            let count = self.blips.iter().filter(|b| b.state == state).count();
            map.insert(state.as_str().to_string(), serde_json::json!(count));
        }

        map
    }
}

/// Shared, cloneable access to the latest published snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotHandle {
    inner: Arc<RwLock<Arc<BlipSnapshot>>>,
}

impl SnapshotHandle {
    pub fn new() -> Self {
        SnapshotHandle::default()
    }

    /// Latest snapshot; cheap, never waits on a tick in progress
    pub fn load(&self) -> Arc<BlipSnapshot> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn publish(&self, snapshot: BlipSnapshot) {
        let snapshot = Arc::new(snapshot);
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SensorSettings;

    fn view(id: u32, state: BlipState) -> BlipView {
        BlipView {
            id: TargetId(id),
            position: Position::new(1.0, 2.0),
            received_power: 1e-8,
            snr_db: 20.0,
            state,
            estimated_rcs: 10.0,
        }
    }

    #[test]
    fn test_summary_map() {
        let snapshot = BlipSnapshot {
            tick: 42,
            sweeps_completed: 1,
            beam_angle: 42.0,
            blips: vec![
                view(1, BlipState::Committed),
                view(2, BlipState::Stale),
                view(3, BlipState::Committed),
            ],
        };

        let map = snapshot.to_summary_map();
        assert_eq!(map.get("tick").unwrap(), 42);
        assert_eq!(map.get("committed").unwrap(), 2);
        assert_eq!(map.get("stale").unwrap(), 1);
        assert_eq!(map.get("beamAngle").unwrap(), 42.0);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(view(7, BlipState::Stale)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["state"], "stale");
        assert_eq!(json["position"][0], 1.0);
        assert_eq!(json["snrDb"], 20.0);
        assert!(json.get("receivedPower").is_some());
        assert!(json.get("estimatedRcs").is_some());
    }

    #[test]
    fn test_view_estimates_rcs() {
        let config = SensorConfig::new(SensorSettings::default()).unwrap();
        let blip = Blip {
            id: TargetId(1),
            position: Position::new(500.0, 400.0),
            distance: 100.0,
            received_power: config.received_power(10.0, 100.0),
            snr_db: 120.0,
            state: BlipState::Committed,
            first_detected_tick: 1,
            last_detected_tick: 1,
        };
        let view = BlipView::from_blip(&blip, &config);
        assert!((view.estimated_rcs - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_handle_publish_and_load() {
        let handle = SnapshotHandle::new();
        let reader = handle.clone();
        assert!(reader.load().is_empty());

        let before = reader.load();
        handle.publish(BlipSnapshot {
            tick: 5,
            blips: vec![view(1, BlipState::Committed)],
            ..Default::default()
        });

        // Earlier readers keep their snapshot
        assert_eq!(before.tick, 0);
        assert_eq!(reader.load().tick, 5);
        assert_eq!(reader.load().len(), 1);
    }

    #[test]
    fn test_handle_is_shareable_across_threads() {
        let handle = SnapshotHandle::new();
        let reader = handle.clone();
        let t = std::thread::spawn(move || reader.load().tick);
        assert_eq!(t.join().unwrap(), 0);
    }
}
