//! Sequential proximity join. The reference path, correct at any size.

use lumen_spatial::{CellId, CellIndex, GridDims, Position, STENCIL};

use crate::{Edge, InteractionRadius};

/// Replace `edges` with every pair of entities within `radius`.
///
/// `index` must have been rebuilt from `positions` on `grid` this frame.
pub fn join(
    grid: &GridDims,
    index: &CellIndex,
    positions: &[Position],
    radius: InteractionRadius,
    edges: &mut Vec<Edge>,
) {
    edges.clear();
    for c in 0..grid.cell_count() {
        join_cell(grid, index, positions, radius, CellId(c as u32), edges);
    }
}

/// Emit all edges whose first endpoint lies in `cell`, following the stencil.
pub(crate) fn join_cell(
    grid: &GridDims,
    index: &CellIndex,
    positions: &[Position],
    radius: InteractionRadius,
    cell: CellId,
    out: &mut Vec<Edge>,
) {
    let here = index.cell(cell);
    if here.is_empty() {
        return;
    }

    for offset in STENCIL {
        if offset.is_self() {
            for (k, &a) in here.iter().enumerate() {
                let pa = positions[a as usize];
                for &b in &here[k + 1..] {
                    emit(a, b, pa, positions[b as usize], radius, out);
                }
            }
        } else if let Some(neighbor) = grid.neighbor(cell, offset) {
            let there = index.cell(neighbor);
            if there.is_empty() {
                continue;
            }
            for &a in here {
                let pa = positions[a as usize];
                for &b in there {
                    emit(a, b, pa, positions[b as usize], radius, out);
                }
            }
        }
    }
}

#[inline]
fn emit(a: u32, b: u32, pa: Position, pb: Position, radius: InteractionRadius, out: &mut Vec<Edge>) {
    if let Some(weight) = radius.weight(pa.distance_squared(pb)) {
        out.push(Edge::new(a, b, weight));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn run(points: &[(f32, f32)], world: f32, r: f32) -> Vec<Edge> {
        let grid = GridDims::new(world, world, r);
        let positions: Vec<Position> = points.iter().map(|&(x, y)| Position::new(x, y)).collect();
        let mut index = CellIndex::new();
        index.rebuild(&grid, &positions);

        let mut edges = Vec::new();
        join(&grid, &index, &positions, InteractionRadius::new(r), &mut edges);
        edges
    }

    #[test]
    fn test_triangle_and_isolated_entity() {
        let edges = run(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (100.0, 100.0)], 150.0, 1.5);

        let keys: HashSet<_> = edges.iter().map(Edge::key).collect();
        assert_eq!(keys, HashSet::from([(0, 1), (0, 2), (1, 2)]));
        assert_eq!(edges.len(), 3);
        assert!(edges.iter().all(|e| !e.touches(3)));

        let e01 = edges.iter().find(|e| e.key() == (0, 1)).unwrap();
        assert!((e01.weight - (1.0 - 1.0 / 2.25)).abs() < 1e-5);
        assert!((e01.weight - 0.5556).abs() < 1e-4);
    }

    #[test]
    fn test_radius_is_inclusive() {
        let at = run(&[(0.0, 0.0), (2.0, 0.0)], 20.0, 2.0);
        assert_eq!(at.len(), 1);
        assert!(at[0].weight.abs() < f32::EPSILON);

        let beyond = run(&[(0.0, 0.0), (2.001, 0.0)], 20.0, 2.0);
        assert!(beyond.is_empty());
    }

    #[test]
    fn test_pairs_across_every_stencil_direction() {
        // Center entity in cell (1, 1) with one neighbor in each of the 8 surrounding cells.
        let mut points = vec![(15.0, 15.0)];
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx != 0 || dy != 0 {
                    points.push((15.0 + dx as f32 * 6.0, 15.0 + dy as f32 * 6.0));
                }
            }
        }
        let edges = run(&points, 30.0, 10.0);

        let center: HashSet<u32> = edges
            .iter()
            .filter(|e| e.touches(0))
            .map(|e| if e.a == 0 { e.b } else { e.a })
            .collect();
        assert_eq!(center, (1..9).collect::<HashSet<u32>>());
    }

    #[test]
    fn test_coincident_entities() {
        let edges = run(&[(5.0, 5.0); 4], 10.0, 1.0);

        assert_eq!(edges.len(), 6);
        assert!(edges.iter().all(|e| e.a != e.b));
        assert!(edges.iter().all(|e| (e.weight - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_edges_are_cleared_between_calls() {
        let grid = GridDims::new(10.0, 10.0, 5.0);
        let mut index = CellIndex::new();
        index.rebuild(&grid, &[]);
        let mut edges = vec![Edge::new(0, 1, 1.0)];

        join(&grid, &index, &[], InteractionRadius::new(5.0), &mut edges);
        assert!(edges.is_empty());
    }
}
