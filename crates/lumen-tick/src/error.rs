//! Scheduler error types.

use thiserror::Error;

/// Errors raised while setting up a scheduler. Frames themselves never fail.
#[derive(Debug, Error)]
pub enum TickError {
    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
