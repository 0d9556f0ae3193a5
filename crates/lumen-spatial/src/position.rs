//! Entity positions as consumed by the index.

use bytemuck::{Pod, Zeroable};

/// 2D world-space position of one entity.
///
/// `#[repr(C)]` and `Pod` so the entity store can be handed to a renderer as
/// raw bytes without copying.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance. The join never takes a square root.
    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_squared_is_symmetric() {
        let a = Position::new(1.0, 2.0);
        let b = Position::new(4.0, 6.0);
        assert!((a.distance_squared(b) - 25.0).abs() < f32::EPSILON);
        assert!((b.distance_squared(a) - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn pod_cast_preserves_layout() {
        let positions = [Position::new(1.0, 2.0), Position::new(3.0, 4.0)];
        let floats: &[f32] = bytemuck::cast_slice(&positions);
        assert_eq!(floats.len(), 4);
        assert!((floats[2] - 3.0).abs() < f32::EPSILON);
    }
}
