//! Interaction radius with its precomputed squares.

/// Smallest radius the join accepts. Keeps `1 / r²` finite.
pub const MIN_RADIUS: f32 = 1e-3;

/// Interaction radius, prepared once per frame for the inner loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionRadius {
    radius: f32,
    squared: f32,
    inv_squared: f32,
}

impl InteractionRadius {
    /// Prepare a radius. Non-positive or non-finite values clamp to [`MIN_RADIUS`].
    #[must_use]
    pub fn new(radius: f32) -> Self {
        let radius = if radius.is_finite() {
            radius.max(MIN_RADIUS)
        } else {
            MIN_RADIUS
        };
        let squared = radius * radius;
        Self {
            radius,
            squared,
            inv_squared: squared.recip(),
        }
    }

    #[must_use]
    pub const fn get(&self) -> f32 {
        self.radius
    }

    #[must_use]
    pub const fn squared(&self) -> f32 {
        self.squared
    }

    /// Edge weight for a squared distance, `None` beyond the radius.
    ///
    /// Inclusive: a pair exactly at the radius gets weight 0.
    #[inline]
    #[must_use]
    pub fn weight(&self, distance_squared: f32) -> Option<f32> {
        (distance_squared <= self.squared)
            .then(|| (1.0 - distance_squared * self.inv_squared).max(0.0))
    }
}
