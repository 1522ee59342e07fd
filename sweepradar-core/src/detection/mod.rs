//! Target Detection
//!
//! Turns the target list for one tick into per-target verdicts.
//!
//! A target outside the beam gets no verdict at all. A target inside the beam
//! gets one of:
//!
//! - **Detected**: inside the envelope with a usable return
//! - **NotDetected**: angularly aligned but out of range, at the sensor
//!   position, or below the SNR threshold
//! - **Skipped**: malformed input, reported and otherwise ignored
//!
//! # Example
//!
//! ```rust,ignore
//! use sweepradar_core::detection::DetectionEngine;
//!
//! let engine = DetectionEngine::new(config);
//! let verdicts = engine.evaluate_all(&targets, &beam);
//! ```

mod evaluator;
mod verdict;

pub use evaluator::{DetectionEngine, DEFAULT_PARALLEL_THRESHOLD};
pub use verdict::{Detection, MissReason, Verdict};
