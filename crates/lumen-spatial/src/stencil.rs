//! Half-neighborhood stencil for symmetric pairwise joins.
//!
//! ```text
//!        x-1   x   x+1
//!  y+1 [  *  |  *  |  *  ]
//!  y   [     |  ●  |  *  ]
//!  y-1 [     |     |     ]
//! ```
//!
//! Applied to every cell, the five offsets visit each unordered pair of
//! adjacent-or-identical cells exactly once. The other four neighbors are
//! covered when the stencil is applied from their side.

/// Direction from one cell to another in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellOffset {
    pub dx: i32,
    pub dy: i32,
}

impl CellOffset {
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// The self offset `(0, 0)`. Pairs inside one cell need `i < j`.
    #[must_use]
    pub const fn is_self(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Self plus the four forward neighbors. The self offset is first.
pub const STENCIL: [CellOffset; 5] = [
    CellOffset::new(0, 0),
    CellOffset::new(1, 0),
    CellOffset::new(1, 1),
    CellOffset::new(0, 1),
    CellOffset::new(-1, 1),
];
