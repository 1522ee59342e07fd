//! Blip Lifecycle
//!
//! A blip is the sensor's belief that a target exists, as opposed to the
//! target itself. Blips are keyed by target identity and move through a
//! small state machine:
//!
//! ```text
//!   detected        sweep complete           sweep complete          sweep complete
//!  ---------> Pending ----------> Committed ----------------> Stale ------------> (removed)
//!                |                 ^   (not seen this sweep)   |   (still not seen)
//!   in beam,     |                 |                           |
//!   not detected v                 +------- detected ----------+
//!            (discarded)
//! ```
//!
//! Only `Committed` and `Stale` blips are visible to the renderer.
//!
//! # Example
//!
//! ```rust,ignore
//! use sweepradar_core::blips::BlipStore;
//!
//! let mut store = BlipStore::new();
//! store.apply(tick, &verdicts);
//! if progress.is_complete() {
//!     store.complete_sweep(tick);
//! }
//! let visible = store.active_blips();
//! ```

mod store;

pub use store::*;
