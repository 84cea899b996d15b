use crate::block_position::BlockPosition;
use serde::{Deserialize, Serialize};

/// Inclusive axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: (i32, i32, i32),
    pub max: (i32, i32, i32),
}

impl BoundingBox {
    /// Corners may be given in any order.
    pub fn new(p1: (i32, i32, i32), p2: (i32, i32, i32)) -> Self {
        let min = (p1.0.min(p2.0), p1.1.min(p2.1), p1.2.min(p2.2));
        let max = (p1.0.max(p2.0), p1.1.max(p2.1), p1.2.max(p2.2));
        Self { min, max }
    }

    pub fn contains(&self, pos: (i32, i32, i32)) -> bool {
        pos.0 >= self.min.0
            && pos.0 <= self.max.0
            && pos.1 >= self.min.1
            && pos.1 <= self.max.1
            && pos.2 >= self.min.2
            && pos.2 <= self.max.2
    }

    /// (width, height, length) along x, y and z.
    pub fn get_dimensions(&self) -> (i32, i32, i32) {
        (
            self.max.0 - self.min.0 + 1,
            self.max.1 - self.min.1 + 1,
            self.max.2 - self.min.2 + 1,
        )
    }

    pub fn volume(&self) -> u64 {
        let (w, h, l) = self.get_dimensions();
        w as u64 * h as u64 * l as u64
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: (
                self.min.0.min(other.min.0),
                self.min.1.min(other.min.1),
                self.min.2.min(other.min.2),
            ),
            max: (
                self.max.0.max(other.max.0),
                self.max.1.max(other.max.1),
                self.max.2.max(other.max.2),
            ),
        }
    }

    /// The box displaced by `offset`, `None` if a corner leaves the `i32`
    /// range.
    pub fn checked_translate(&self, offset: BlockPosition) -> Option<BoundingBox> {
        Some(BoundingBox {
            min: (
                self.min.0.checked_add(offset.x)?,
                self.min.1.checked_add(offset.y)?,
                self.min.2.checked_add(offset.z)?,
            ),
            max: (
                self.max.0.checked_add(offset.x)?,
                self.max.1.checked_add(offset.y)?,
                self.max.2.checked_add(offset.z)?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_corners_are_normalized() {
        let bbox = BoundingBox::new((5, 0, 5), (0, 3, 0));
        assert_eq!(bbox.min, (0, 0, 0));
        assert_eq!(bbox.max, (5, 3, 5));
        assert_eq!(bbox.get_dimensions(), (6, 4, 6));
        assert_eq!(bbox.volume(), 144);
    }

    #[test]
    fn test_checked_translate() {
        let bbox = BoundingBox::new((0, 0, 0), (2, 2, 2));
        let moved = bbox.checked_translate(BlockPosition::new(3, -1, 0)).unwrap();
        assert_eq!(moved, BoundingBox::new((3, -1, 0), (5, 1, 2)));
        assert!(bbox
            .checked_translate(BlockPosition::new(i32::MAX - 1, 0, 0))
            .is_none());
    }
}
