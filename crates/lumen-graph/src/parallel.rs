//! Data-parallel proximity join.

use lumen_spatial::{CellId, CellIndex, GridDims, Position};
use rayon::prelude::*;

use crate::join::{join, join_cell};
use crate::{CellDispenser, Edge, EdgeBuffers, InteractionRadius};

/// Same edge set as [`join`], computed by `threads` workers on the current
/// rayon pool.
///
/// Each worker owns one lane of `buffers` and pulls batches of cells from a
/// shared [`CellDispenser`]. The grid index and positions are only read.
/// Lanes are concatenated into `edges` in lane order once every worker has
/// finished. Edge order is not stable across runs.
///
/// Falls back to the sequential join when `threads <= 1`. The worker count is
/// clamped to the number of cells.
pub fn join_parallel(
    grid: &GridDims,
    index: &CellIndex,
    positions: &[Position],
    radius: InteractionRadius,
    buffers: &mut EdgeBuffers,
    threads: usize,
    edges: &mut Vec<Edge>,
) {
    let cells = grid.cell_count();
    let workers = threads.min(cells);
    if workers <= 1 {
        join(grid, index, positions, radius, edges);
        return;
    }

    buffers.prepare(workers);
    let dispenser = CellDispenser::new(cells, workers);

    buffers.lanes.par_iter_mut().for_each(|lane| {
        while let Some(batch) = dispenser.claim() {
            for c in batch {
                join_cell(grid, index, positions, radius, CellId(c as u32), lane);
            }
        }
    });

    buffers.merge_into(edges);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lattice(n: usize, width: f32, height: f32) -> Vec<Position> {
        (0..n)
            .map(|i| {
                let f = i as f32;
                Position::new((f * 12.913) % width, (f * 7.077) % height)
            })
            .collect()
    }

    fn by_key(edges: &[Edge]) -> HashMap<(u32, u32), f32> {
        let map: HashMap<_, _> = edges.iter().map(|e| (e.key(), e.weight)).collect();
        assert_eq!(map.len(), edges.len(), "duplicate edge emitted");
        map
    }

    #[test]
    fn test_matches_sequential_edge_set() {
        let grid = GridDims::new(400.0, 300.0, 15.0);
        let positions = lattice(2500, 400.0, 300.0);
        let radius = InteractionRadius::new(15.0);

        let mut index = CellIndex::new();
        index.rebuild(&grid, &positions);

        let mut expected = Vec::new();
        join(&grid, &index, &positions, radius, &mut expected);
        let expected = by_key(&expected);

        let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let mut buffers = EdgeBuffers::new();
        let mut edges = Vec::new();
        for threads in [2, 4, 9] {
            pool.install(|| {
                join_parallel(&grid, &index, &positions, radius, &mut buffers, threads, &mut edges);
            });
            assert_eq!(by_key(&edges), expected, "threads = {threads}");
        }
    }

    #[test]
    fn test_single_worker_falls_back() {
        let grid = GridDims::new(40.0, 40.0, 10.0);
        let positions = lattice(100, 40.0, 40.0);
        let radius = InteractionRadius::new(10.0);

        let mut index = CellIndex::new();
        index.rebuild(&grid, &positions);

        let mut expected = Vec::new();
        join(&grid, &index, &positions, radius, &mut expected);

        let mut buffers = EdgeBuffers::new();
        let mut edges = Vec::new();
        join_parallel(&grid, &index, &positions, radius, &mut buffers, 1, &mut edges);
        assert_eq!(edges, expected);
        assert_eq!(buffers.lanes(), 0);
    }

    #[test]
    fn test_workers_clamped_to_cells() {
        let grid = GridDims::new(20.0, 10.0, 10.0);
        let positions = vec![Position::new(9.0, 5.0), Position::new(11.0, 5.0)];
        let radius = InteractionRadius::new(10.0);

        let mut index = CellIndex::new();
        index.rebuild(&grid, &positions);

        let mut buffers = EdgeBuffers::new();
        let mut edges = Vec::new();
        join_parallel(&grid, &index, &positions, radius, &mut buffers, 64, &mut edges);

        assert_eq!(buffers.lanes(), 2);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].key(), (0, 1));
    }
}
