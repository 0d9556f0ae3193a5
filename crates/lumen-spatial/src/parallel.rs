//! Data-parallel counting sort.
//!
//! ```text
//! Phase 1: per-slice histogram, cache each entity's cell     (parallel over slices)
//! Phase 2: reduce slice histograms into counts               (parallel over cells)
//! Phase 3: exclusive prefix sum counts → offsets             (sequential)
//! Phase 4: per-slice write starts inside each cell's range   (parallel over cells)
//! Phase 5: scatter entity indices at per-slice cursors       (parallel over slices)
//! ```
//!
//! Every phase is a full barrier. Phase 4 hands each slice a disjoint
//! sub-range of every cell, so no two slices ever write the same `items` slot.

use std::sync::atomic::{AtomicU32, Ordering};

use rayon::prelude::*;

use crate::{CellIndex, GridDims, Position, RebuildScratch};

/// Below this many entities the parallel rebuild costs more than it saves.
pub const PARALLEL_MIN_ENTITIES: usize = 2000;

/// Below this many cells the parallel rebuild costs more than it saves.
pub const PARALLEL_MIN_CELLS: usize = 16;

/// Minimum cells per rayon task in the per-cell phases.
const CELLS_PER_TASK: usize = 256;

/// Whether a workload is large enough for the parallel path.
#[must_use]
pub const fn should_parallelize(entities: usize, cells: usize) -> bool {
    entities >= PARALLEL_MIN_ENTITIES && cells >= PARALLEL_MIN_CELLS
}

impl CellIndex {
    /// Rebuild with `threads` contiguous entity slices on the current rayon pool.
    ///
    /// Produces the same `counts` and `offsets` as [`CellIndex::rebuild`].
    /// Falls back to the sequential rebuild when `threads <= 1`. Size
    /// thresholds are the caller's decision, see [`should_parallelize`].
    pub fn rebuild_parallel(
        &mut self,
        grid: &GridDims,
        positions: &[Position],
        scratch: &mut RebuildScratch,
        threads: usize,
    ) {
        let entities = positions.len();
        if threads <= 1 || entities == 0 {
            self.rebuild(grid, positions);
            return;
        }

        let cells = grid.cell_count();
        let slice_len = entities.div_ceil(threads);
        let slices = entities.div_ceil(slice_len);

        scratch.prepare(slices, cells, entities);
        self.reset(cells, entities);

        let RebuildScratch {
            histogram,
            starts,
            cell_ids,
        } = scratch;

        // Phase 1
        histogram
            .par_chunks_mut(cells)
            .zip(cell_ids.par_chunks_mut(slice_len))
            .zip(positions.par_chunks(slice_len))
            .for_each(|((hist, ids), slice)| {
                for (id, &position) in ids.iter_mut().zip(slice) {
                    let cell = grid.cell_at(position).0;
                    *id = cell;
                    hist[cell as usize] += 1;
                }
            });

        // Phase 2
        let hist: &[u32] = &histogram[..];
        self.counts
            .par_iter_mut()
            .enumerate()
            .with_min_len(CELLS_PER_TASK)
            .for_each(|(c, count)| {
                *count = (0..slices).map(|t| hist[t * cells + c]).sum();
            });

        // Phase 3
        self.fill_offsets();

        // Phase 4
        let offsets: &[u32] = &self.offsets;
        starts
            .par_chunks_mut(slices)
            .enumerate()
            .with_min_len(CELLS_PER_TASK)
            .for_each(|(c, row)| {
                let mut next = offsets[c];
                for (t, start) in row.iter_mut().enumerate() {
                    *start = next;
                    next += hist[t * cells + c];
                }
            });

        // Phase 5: the histogram rows become write cursors. `items` is viewed
        // as atomics for the scatter; the conversion reuses the allocation.
        let starts: &[u32] = &starts[..];
        let slots: Vec<AtomicU32> = std::mem::take(&mut self.items)
            .into_iter()
            .map(AtomicU32::new)
            .collect();
        histogram
            .par_chunks_mut(cells)
            .enumerate()
            .zip(cell_ids.par_chunks(slice_len))
            .for_each(|((t, cursor), ids)| {
                for (c, next) in cursor.iter_mut().enumerate() {
                    *next = starts[c * slices + t];
                }
                let first = t * slice_len;
                for (k, &cell) in ids.iter().enumerate() {
                    let next = &mut cursor[cell as usize];
                    slots[*next as usize].store((first + k) as u32, Ordering::Relaxed);
                    *next += 1;
                }
            });
        self.items = slots.into_iter().map(AtomicU32::into_inner).collect();

        debug_assert_eq!(self.offsets[cells] as usize, entities);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice(n: usize, width: f32, height: f32) -> Vec<Position> {
        (0..n)
            .map(|i| {
                let f = i as f32;
                Position::new((f * 7.31) % width, (f * 3.17) % height)
            })
            .collect()
    }

    fn run_on(threads: usize, f: impl FnOnce() + Send) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(f);
    }

    #[test]
    fn test_matches_sequential_counts_and_offsets() {
        let grid = GridDims::new(800.0, 600.0, 20.0);
        let pts = lattice(5000, 800.0, 600.0);

        let mut expected = CellIndex::new();
        expected.rebuild(&grid, &pts);

        for threads in [2, 3, 4, 7, 16] {
            let mut index = CellIndex::new();
            let mut scratch = RebuildScratch::new();
            run_on(threads, || index.rebuild_parallel(&grid, &pts, &mut scratch, threads));

            assert_eq!(index.counts(), expected.counts(), "threads = {threads}");
            assert_eq!(index.offsets(), expected.offsets(), "threads = {threads}");

            for c in 0..grid.cell_count() as u32 {
                let mut got = index.cell(crate::CellId(c)).to_vec();
                let mut want = expected.cell(crate::CellId(c)).to_vec();
                got.sort_unstable();
                want.sort_unstable();
                assert_eq!(got, want);
            }
        }
    }

    #[test]
    fn test_more_threads_than_entities() {
        let grid = GridDims::new(100.0, 100.0, 10.0);
        let pts = lattice(5, 100.0, 100.0);

        let mut index = CellIndex::new();
        let mut scratch = RebuildScratch::new();
        run_on(4, || index.rebuild_parallel(&grid, &pts, &mut scratch, 32));

        let mut items = index.items().to_vec();
        items.sort_unstable();
        assert_eq!(items, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_single_thread_falls_back() {
        let grid = GridDims::new(100.0, 100.0, 10.0);
        let pts = lattice(300, 100.0, 100.0);

        let mut sequential = CellIndex::new();
        sequential.rebuild(&grid, &pts);

        let mut index = CellIndex::new();
        index.rebuild_parallel(&grid, &pts, &mut RebuildScratch::new(), 1);
        assert_eq!(index.items(), sequential.items());
    }

    #[test]
    fn test_thresholds() {
        assert!(!should_parallelize(1999, 1200));
        assert!(!should_parallelize(5000, 15));
        assert!(should_parallelize(2000, 16));
    }
}
