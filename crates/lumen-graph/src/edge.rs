//! Weighted proximity edges.

use bytemuck::{Pod, Zeroable};

/// Unordered pair of entities within the interaction radius.
///
/// `weight` is `1 - d² / r²`: 1 when the entities coincide, 0 exactly at
/// the radius. Edges live for one frame only.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Edge {
    pub a: u32,
    pub b: u32,
    pub weight: f32,
}

impl Edge {
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32, weight: f32) -> Self {
        Self { a, b, weight }
    }

    /// Endpoints in ascending order, for comparing edges as unordered pairs.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> (u32, u32) {
        if self.a < self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    /// Whether `entity` is one of the endpoints.
    #[inline]
    #[must_use]
    pub const fn touches(&self, entity: u32) -> bool {
        self.a == entity || self.b == entity
    }
}

/// Sum of all edge weights, accumulated in `f64`.
#[must_use]
pub fn total_weight(edges: &[Edge]) -> f64 {
    edges.iter().map(|e| f64::from(e.weight)).sum()
}
