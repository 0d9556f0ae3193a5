//! Dispatch of the rebuild and join onto the sequential or parallel path.

use lumen_graph::{Edge, EdgeBuffers, InteractionRadius, join, join_parallel, total_weight};
use lumen_spatial::{CellIndex, GridDims, Position, RebuildScratch, should_parallelize};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, debug_span, trace};

use crate::{ExecutedPath, ExecutionMode, TickError};

/// Summary of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub entities: usize,
    pub cells: usize,
    pub edges: usize,
    /// Sum of all edge weights.
    pub weight_sum: f64,
    pub path: ExecutedPath,
}

/// Runs the per-frame grid rebuild and proximity join.
///
/// Owns the worker pool and every per-thread scratch buffer, so buffers are
/// resized between frames instead of reallocated. The cell index and edge
/// list belong to the caller and are rebuilt in full every frame.
pub struct Scheduler {
    mode: ExecutionMode,
    pool: Option<ThreadPool>,
    rebuild: RebuildScratch,
    lanes: EdgeBuffers,
}

impl Scheduler {
    /// Create a scheduler. Parallel mode spawns a dedicated worker pool.
    pub fn new(mode: ExecutionMode) -> Result<Self, TickError> {
        let pool = match mode {
            ExecutionMode::Sequential => None,
            ExecutionMode::Parallel { threads } => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("lumen-worker-{i}"))
                    .build()?;
                debug!(threads = pool.current_num_threads(), "worker pool ready");
                Some(pool)
            }
        };

        Ok(Self {
            mode,
            pool,
            rebuild: RebuildScratch::new(),
            lanes: EdgeBuffers::new(),
        })
    }

    /// A scheduler that never leaves the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            mode: ExecutionMode::Sequential,
            pool: None,
            rebuild: RebuildScratch::new(),
            lanes: EdgeBuffers::new(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Worker threads available to a frame, 1 in sequential mode.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.pool.as_ref().map_or(1, ThreadPool::current_num_threads)
    }

    /// Decide which path a workload takes.
    ///
    /// Threads are clamped to `[1, cells]`. The parallel path needs at least
    /// two effective threads and a workload above the size thresholds.
    #[must_use]
    pub fn plan(&self, entities: usize, cells: usize) -> ExecutedPath {
        if self.pool.is_none() {
            return ExecutedPath::Sequential;
        }

        let threads = self.threads().clamp(1, cells.max(1));
        if threads < 2 || !should_parallelize(entities, cells) {
            trace!(entities, cells, threads, "workload below parallel threshold");
            return ExecutedPath::Sequential;
        }
        ExecutedPath::Parallel { threads }
    }

    /// Rebuild `index` from `positions` and replace `edges` with this frame's
    /// proximity graph.
    pub fn run_frame(
        &mut self,
        grid: &GridDims,
        positions: &[Position],
        radius: InteractionRadius,
        index: &mut CellIndex,
        edges: &mut Vec<Edge>,
    ) -> FrameStats {
        let entities = positions.len();
        let cells = grid.cell_count();
        let path = self.plan(entities, cells);

        let Self {
            pool,
            rebuild,
            lanes,
            ..
        } = self;

        match (path, pool.as_ref()) {
            (ExecutedPath::Parallel { threads }, Some(pool)) => pool.install(|| {
                {
                    let _span = debug_span!("rebuild", entities, cells, threads).entered();
                    index.rebuild_parallel(grid, positions, rebuild, threads);
                }
                let _span = debug_span!("join", threads).entered();
                join_parallel(grid, index, positions, radius, lanes, threads, edges);
            }),
            _ => {
                {
                    let _span = debug_span!("rebuild", entities, cells).entered();
                    index.rebuild(grid, positions);
                }
                let _span = debug_span!("join").entered();
                join(grid, index, positions, radius, edges);
            }
        }

        FrameStats {
            entities,
            cells,
            edges: edges.len(),
            weight_sum: total_weight(edges),
            path,
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("mode", &self.mode)
            .field("threads", &self.threads())
            .finish_non_exhaustive()
    }
}
