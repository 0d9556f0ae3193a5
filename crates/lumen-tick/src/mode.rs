//! Execution modes, named by what actually runs.

use std::fmt;

/// How the scheduler is allowed to execute a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Always run on the calling thread.
    #[default]
    Sequential,
    /// Run on a dedicated worker pool when the workload is large enough.
    /// `threads == 0` lets rayon pick the thread count.
    Parallel { threads: usize },
}

/// The path a frame actually took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutedPath {
    Sequential,
    Parallel { threads: usize },
}

impl ExecutedPath {
    #[must_use]
    pub const fn is_parallel(self) -> bool {
        matches!(self, Self::Parallel { .. })
    }
}

impl fmt::Display for ExecutedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "SEQ"),
            Self::Parallel { threads } => write!(f, "PAR×{threads}"),
        }
    }
}
