//! Cell index layout and the sequential counting-sort rebuild.

use crate::{CellId, GridDims, Position};

/// Compact "cell → contiguous range of entity indices" layout.
///
/// Invariants after a rebuild:
/// - `offsets.len() == counts.len() + 1` and `offsets[cells] == entities`
/// - `items[offsets[c]..offsets[c + 1]]` are exactly the entities of cell `c`
/// - `items` is a permutation of `0..entities`
///
/// The index only ever stores entity indices, never entity data.
#[derive(Debug, Default, Clone)]
pub struct CellIndex {
    pub(crate) counts: Vec<u32>,
    pub(crate) offsets: Vec<u32>,
    pub(crate) items: Vec<u32>,
    /// Per-cell write cursor for the sequential scatter pass.
    cursor: Vec<u32>,
}

impl CellIndex {
    /// Create an empty index. Buffers grow on the first rebuild.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from scratch with a three-pass counting sort.
    ///
    /// O(entities + cells). Re-running with unchanged positions yields the same
    /// partition; ordering inside a cell is not part of the contract.
    pub fn rebuild(&mut self, grid: &GridDims, positions: &[Position]) {
        self.reset(grid.cell_count(), positions.len());

        for &position in positions {
            self.counts[grid.cell_at(position).index()] += 1;
        }

        self.fill_offsets();

        self.cursor.clear();
        self.cursor.extend_from_slice(&self.counts);
        for (entity, &position) in positions.iter().enumerate() {
            let cell = grid.cell_at(position).index();
            self.cursor[cell] -= 1;
            let slot = self.offsets[cell] + self.cursor[cell];
            self.items[slot as usize] = entity as u32;
        }
    }

    /// Size the buffers for a new frame. Reuses existing allocations.
    pub(crate) fn reset(&mut self, cells: usize, entities: usize) {
        debug_assert!(
            u32::try_from(entities).is_ok(),
            "entity indices are stored as u32"
        );
        self.counts.clear();
        self.counts.resize(cells, 0);
        self.offsets.clear();
        self.offsets.resize(cells + 1, 0);
        self.items.resize(entities, 0);
    }

    /// Exclusive prefix sum of `counts` into `offsets`.
    pub(crate) fn fill_offsets(&mut self) {
        let mut running = 0;
        self.offsets[0] = 0;
        for (c, &count) in self.counts.iter().enumerate() {
            running += count;
            self.offsets[c + 1] = running;
        }
    }

    /// Entity indices of one cell.
    #[inline]
    #[must_use]
    pub fn cell(&self, id: CellId) -> &[u32] {
        let c = id.index();
        &self.items[self.offsets[c] as usize..self.offsets[c + 1] as usize]
    }

    /// Entities per cell.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Exclusive prefix sum of `counts`, one longer than the cell count.
    #[must_use]
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Entity indices grouped by cell.
    #[must_use]
    pub fn items(&self) -> &[u32] {
        &self.items
    }

    /// Number of cells covered by the last rebuild.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.counts.len()
    }

    /// Number of entities indexed by the last rebuild.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the index holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
