//! Sweepradar Server
//!
//! Runs a [`sweepradar_core::RadarEngine`] against a field of simulated
//! moving targets and serves the published blip snapshots over HTTP.
//!
//! Two subsystems run under `tokio-graceful-shutdown`:
//!
//! - **simulation**: ticks the engine at a fixed rate and moves the targets
//! - **webserver**: axum router reading the latest snapshot

pub mod settings;
pub mod simulation;
pub mod targets;
pub mod web;

pub use settings::{ServerSettings, SimulationSettings, TargetSpec};
pub use simulation::Simulation;
pub use targets::{MovingTarget, TargetField};
pub use web::AppState;
