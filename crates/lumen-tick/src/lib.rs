//! Frame execution for the proximity engine.
//!
//! # Frame Execution Model
//!
//! ```text
//! Frame N (positions already updated, read-only from here on):
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Plan:  pick sequential or parallel from mode + workload    │
//! │  Phase 1: Per-slice histograms, cache cell ids              │
//! │  Phase 2: Reduce histograms into counts           (barrier) │
//! │  Phase 3: Prefix sum counts → offsets             (barrier) │
//! │  Phase 4: Per-slice write starts                  (barrier) │
//! │  Phase 5: Scatter entity indices into items       (barrier) │
//! │  Phase 6: Stencil join into per-worker lanes      (barrier) │
//! │  Phase 7: Concatenate lanes into the edge list              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sequential path runs the same steps on the calling thread and is
//! always available. Parallelism is an optimization, never required for
//! correctness.

mod error;
mod mode;
mod scheduler;

pub use error::TickError;
pub use mode::{ExecutedPath, ExecutionMode};
pub use scheduler::{FrameStats, Scheduler};
