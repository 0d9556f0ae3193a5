//! Per-thread edge buffers and guided cell scheduling.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Edge;

/// Smallest batch of cells a worker claims at once.
const MIN_BATCH: usize = 8;

/// One private, growable edge buffer per worker, reused across frames.
///
/// Workers never share a lane. After the join barrier the lanes are
/// concatenated in lane order.
#[derive(Debug, Default)]
pub struct EdgeBuffers {
    pub(crate) lanes: Vec<Vec<Edge>>,
    /// Edges produced by the previous frame, used to pre-size the lanes.
    last_total: usize,
}

impl EdgeBuffers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure there are exactly `workers` empty lanes with room for an
    /// even share of last frame's edges.
    pub(crate) fn prepare(&mut self, workers: usize) {
        self.lanes.resize_with(workers, Vec::new);
        let share = self.last_total.div_ceil(workers.max(1));
        for lane in &mut self.lanes {
            lane.clear();
            lane.reserve(share);
        }
    }

    /// Concatenate all lanes into `edges`, in lane order. Lane capacity is kept.
    pub(crate) fn merge_into(&mut self, edges: &mut Vec<Edge>) {
        let total = self.lanes.iter().map(Vec::len).sum();
        edges.clear();
        edges.reserve(total);
        for lane in &mut self.lanes {
            edges.extend_from_slice(lane);
            lane.clear();
        }
        self.last_total = total;
    }

    /// Number of lanes currently allocated.
    #[must_use]
    pub fn lanes(&self) -> usize {
        self.lanes.len()
    }
}

/// Hands out batches of cell indices to workers.
///
/// Guided scheduling: each claim takes `remaining / (2 × workers)` cells, but
/// never fewer than a small minimum. Early batches are large and late batches
/// small, so a worker stuck on a dense region does not hold up the frame.
#[derive(Debug)]
pub struct CellDispenser {
    next: AtomicUsize,
    end: usize,
    workers: usize,
}

impl CellDispenser {
    #[must_use]
    pub fn new(cells: usize, workers: usize) -> Self {
        Self {
            next: AtomicUsize::new(0),
            end: cells,
            workers: workers.max(1),
        }
    }

    /// Claim the next batch, `None` once every cell has been handed out.
    pub fn claim(&self) -> Option<Range<usize>> {
        let mut start = self.next.load(Ordering::Relaxed);
        loop {
            if start >= self.end {
                return None;
            }
            let remaining = self.end - start;
            let size = (remaining / (2 * self.workers)).max(MIN_BATCH).min(remaining);
            match self.next.compare_exchange_weak(
                start,
                start + size,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Some(start..start + size),
                Err(actual) => start = actual,
            }
        }
    }
}
