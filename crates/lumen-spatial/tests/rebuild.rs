//! Integration tests for the sequential and parallel grid rebuilds.

use lumen_spatial::{CellId, CellIndex, GridDims, Position, RebuildScratch};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn scatter(n: usize, width: f32, height: f32, seed: u64) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Position::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)))
        .collect()
}

fn assert_valid_layout(grid: &GridDims, index: &CellIndex, positions: &[Position]) {
    let cells = grid.cell_count();
    assert_eq!(index.counts().len(), cells);
    assert_eq!(index.offsets().len(), cells + 1);
    assert_eq!(index.offsets()[0], 0);
    assert_eq!(index.offsets()[cells] as usize, positions.len());

    let mut seen = vec![false; positions.len()];
    for c in 0..cells {
        let id = CellId(c as u32);
        for &e in index.cell(id) {
            assert!(!seen[e as usize], "entity {e} appears twice");
            seen[e as usize] = true;
            assert_eq!(grid.cell_at(positions[e as usize]), id);
        }
    }
    assert!(seen.iter().all(|&s| s), "some entity was never indexed");
}

#[test]
fn test_sequential_layout_is_exact() {
    let grid = GridDims::new(800.0, 600.0, 20.0);
    let pts = scatter(3000, 800.0, 600.0, 7);

    let mut index = CellIndex::new();
    index.rebuild(&grid, &pts);
    assert_valid_layout(&grid, &index, &pts);
}

#[test]
fn test_parallel_layout_is_exact() {
    let grid = GridDims::new(800.0, 600.0, 20.0);
    let pts = scatter(4000, 800.0, 600.0, 11);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();

    let mut index = CellIndex::new();
    let mut scratch = RebuildScratch::new();
    pool.install(|| index.rebuild_parallel(&grid, &pts, &mut scratch, 4));
    assert_valid_layout(&grid, &index, &pts);
}

#[test]
fn test_parallel_scratch_survives_changing_workloads() {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(3).build().unwrap();
    let mut index = CellIndex::new();
    let mut scratch = RebuildScratch::new();

    for (frame, (n, cell)) in [(2500, 20.0), (6000, 35.0), (2100, 12.0)].into_iter().enumerate() {
        let grid = GridDims::new(640.0, 480.0, cell);
        let pts = scatter(n, 640.0, 480.0, frame as u64);
        pool.install(|| index.rebuild_parallel(&grid, &pts, &mut scratch, 3));
        assert_valid_layout(&grid, &index, &pts);
    }
}

#[test]
fn test_out_of_world_entities_are_clamped() {
    let grid = GridDims::new(100.0, 100.0, 10.0);
    let pts = vec![
        Position::new(-50.0, -50.0),
        Position::new(150.0, 5.0),
        Position::new(50.0, 1e12),
        Position::new(f32::NAN, 5.0),
    ];

    let mut index = CellIndex::new();
    index.rebuild(&grid, &pts);
    assert_valid_layout(&grid, &index, &pts);
    assert_eq!(index.counts()[0], 2);
    assert_eq!(index.counts()[9], 1);
    assert_eq!(index.counts()[95], 1);
}

#[test]
fn test_positions_on_cell_boundaries() {
    let grid = GridDims::new(100.0, 100.0, 10.0);
    let pts: Vec<Position> = (0..10)
        .map(|k| Position::new(k as f32 * 10.0, k as f32 * 10.0))
        .collect();

    let mut index = CellIndex::new();
    index.rebuild(&grid, &pts);

    for (k, &p) in pts.iter().enumerate() {
        let coord = grid.coord_at(p);
        assert_eq!((coord.x, coord.y), (k as i32, k as i32));
        assert_eq!(index.cell(grid.cell_at(p)), &[k as u32]);
    }
}
