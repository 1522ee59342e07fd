//! Sweepradar Core
//!
//! Platform-independent engine for a rotating-beam radar sensor. The beam
//! sweeps around a fixed center; on every tick the engine works out which
//! targets are illuminated, runs the radar equation for them and keeps a
//! persistent set of blips across sweep cycles.
//!
//! There is no I/O in this crate: target motion, rendering and the frame loop
//! belong to the caller.
//!
//! # Modules
//!
//! - **signal**: radar equation, noise, SNR, jamming and Doppler functions
//! - **geometry**: angle normalization and beam containment
//! - **sweep**: beam rotation and sweep-complete detection
//! - **detection**: per-target verdicts for a tick
//! - **blips**: blip lifecycle store
//! - **snapshot**: read-only published view of active blips
//! - **engine**: ties it all together, one tick at a time
//!
//! # Example
//!
//! ```rust,ignore
//! use sweepradar_core::{RadarEngine, SensorConfig, SensorSettings, Target, TargetId};
//!
//! let config = SensorConfig::new(SensorSettings::default())?;
//! let mut engine = RadarEngine::new(config);
//!
//! let targets = vec![Target::new(TargetId(1), 500.0, 400.0, 10.0)];
//! let report = engine.tick(&targets);
//!
//! for blip in engine.active_blips().blips.iter() {
//!     println!("{} at {:?}: {:.1} dB", blip.id, blip.position, blip.snr_db);
//! }
//! ```

pub mod blips;
pub mod config;
pub mod detection;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod signal;
pub mod snapshot;
pub mod sweep;
pub mod target;

pub use blips::{ApplyStats, Blip, BlipState, BlipStore, SweepTransitions};
pub use config::{SensorConfig, SensorSettings};
pub use detection::{Detection, DetectionEngine, MissReason, Verdict};
pub use engine::{RadarEngine, TickReport};
pub use error::{ConfigError, MalformedTarget, SignalError};
pub use geometry::Beam;
pub use snapshot::{BlipSnapshot, BlipView, SnapshotHandle};
pub use sweep::{SweepController, SweepProgress};
pub use target::{KindDefaults, Target, TargetId, TargetKind};

/// 2D position in abstract distance units
pub type Position = nalgebra::Point2<f64>;
