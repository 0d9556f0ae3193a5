//! Scratch buffers for the parallel rebuild, reused across frames.

/// Per-thread working memory for [`CellIndex::rebuild_parallel`].
///
/// Owned by the caller and passed in every frame, so the histograms are
/// resized in place rather than reallocated. Nothing here is shared between
/// worker threads: each thread only touches its own histogram row and its own
/// slice of `cell_ids`.
///
/// [`CellIndex::rebuild_parallel`]: crate::CellIndex::rebuild_parallel
#[derive(Debug, Default)]
pub struct RebuildScratch {
    /// `slices × cells`, thread-major. Phase 1 counts, phase 5 write cursors.
    pub(crate) histogram: Vec<u32>,
    /// `cells × slices`, cell-major. First `items` slot of each slice in each cell.
    pub(crate) starts: Vec<u32>,
    /// Cell of every entity, computed once in phase 1 and reused in phase 5.
    pub(crate) cell_ids: Vec<u32>,
}

impl RebuildScratch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create scratch pre-sized for a known workload.
    #[must_use]
    pub fn with_capacity(threads: usize, cells: usize, entities: usize) -> Self {
        Self {
            histogram: Vec::with_capacity(threads * cells),
            starts: Vec::with_capacity(threads * cells),
            cell_ids: Vec::with_capacity(entities),
        }
    }

    /// Size every buffer for this frame. Histograms are zeroed.
    pub(crate) fn prepare(&mut self, slices: usize, cells: usize, entities: usize) {
        self.histogram.clear();
        self.histogram.resize(slices * cells, 0);
        self.starts.resize(slices * cells, 0);
        self.cell_ids.resize(entities, 0);
    }

    /// Bytes currently reserved, for diagnostics.
    #[must_use]
    pub fn reserved_bytes(&self) -> usize {
        (self.histogram.capacity() + self.starts.capacity() + self.cell_ids.capacity())
            * size_of::<u32>()
    }
}
