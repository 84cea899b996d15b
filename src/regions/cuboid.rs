use super::{Region, RegionIter};
use crate::block_position::BlockPosition;
use crate::bounding_box::BoundingBox;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuboidRegion {
    pub min: BlockPosition,
    pub max: BlockPosition,
}

impl CuboidRegion {
    /// Builds the cuboid spanned by two opposite corners, inclusive. The
    /// corners may come in any order.
    pub fn new(p1: impl Into<BlockPosition>, p2: impl Into<BlockPosition>) -> Self {
        let (p1, p2): (BlockPosition, BlockPosition) = (p1.into(), p2.into());
        Self::from_bounding_box(BoundingBox::new(p1.into(), p2.into()))
    }

    pub fn from_bounding_box(bbox: BoundingBox) -> Self {
        Self {
            min: bbox.min.into(),
            max: bbox.max.into(),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            min: self.min.into(),
            max: self.max.into(),
        }
    }

    pub fn translate(&self, offset: BlockPosition) -> CuboidRegion {
        CuboidRegion {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    pub fn length(&self) -> i32 {
        self.max.z - self.min.z + 1
    }

    /// True when the position lies on one of the four vertical faces.
    pub fn is_on_walls(&self, pos: BlockPosition) -> bool {
        self.contains(pos)
            && (pos.x == self.min.x
                || pos.x == self.max.x
                || pos.z == self.min.z
                || pos.z == self.max.z)
    }

    /// True when the position lies on any of the six faces.
    pub fn is_on_shell(&self, pos: BlockPosition) -> bool {
        self.is_on_walls(pos)
            || (self.contains(pos) && (pos.y == self.min.y || pos.y == self.max.y))
    }
}

impl Region for CuboidRegion {
    fn contains(&self, pos: BlockPosition) -> bool {
        self.bounding_box().contains(pos.into())
    }

    fn iter(&self) -> RegionIter<'_> {
        RegionIter::Cuboid(CuboidIter::new(self.min, self.max))
    }

    fn bounds(&self) -> Option<BoundingBox> {
        Some(self.bounding_box())
    }

    fn volume(&self) -> usize {
        self.bounding_box().volume() as usize
    }

    fn columns(&self) -> Vec<(i32, i32)> {
        let mut columns =
            Vec::with_capacity(self.width() as usize * self.length() as usize);
        for z in self.min.z..=self.max.z {
            for x in self.min.x..=self.max.x {
                columns.push((x, z));
            }
        }
        columns
    }
}

/// Lazy walk over a cuboid: x fastest, then z, then y.
#[derive(Debug, Clone)]
pub struct CuboidIter {
    min: BlockPosition,
    max: BlockPosition,
    next: Option<BlockPosition>,
    remaining: usize,
}

impl CuboidIter {
    fn new(min: BlockPosition, max: BlockPosition) -> Self {
        let remaining = BoundingBox {
            min: min.into(),
            max: max.into(),
        }
        .volume() as usize;
        Self {
            min,
            max,
            next: Some(min),
            remaining,
        }
    }
}

impl Iterator for CuboidIter {
    type Item = BlockPosition;

    fn next(&mut self) -> Option<BlockPosition> {
        let current = self.next?;
        // Compare before stepping: max may be i32::MAX.
        self.next = if current.x < self.max.x {
            Some(BlockPosition::new(current.x + 1, current.y, current.z))
        } else if current.z < self.max.z {
            Some(BlockPosition::new(self.min.x, current.y, current.z + 1))
        } else if current.y < self.max.y {
            Some(BlockPosition::new(self.min.x, current.y + 1, self.min.z))
        } else {
            None
        };
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_order_is_x_then_z_then_y() {
        let region = CuboidRegion::new((0, 0, 0), (1, 1, 1));
        let points: Vec<(i32, i32, i32)> = region.iter().map(Into::into).collect();
        assert_eq!(
            points,
            vec![
                (0, 0, 0),
                (1, 0, 0),
                (0, 0, 1),
                (1, 0, 1),
                (0, 1, 0),
                (1, 1, 0),
                (0, 1, 1),
                (1, 1, 1),
            ]
        );
    }

    #[test]
    fn test_iteration_is_restartable() {
        let region = CuboidRegion::new((0, 0, 0), (2, 2, 2));
        assert_eq!(region.iter().count(), 27);
        assert_eq!(region.iter().count(), 27);
        assert_eq!(region.iter().size_hint(), (27, Some(27)));
    }

    #[test]
    fn test_inverted_corners() {
        let region = CuboidRegion::new((3, 4, 5), (1, 2, 3));
        assert_eq!(region.min, BlockPosition::new(1, 2, 3));
        assert_eq!(region.max, BlockPosition::new(3, 4, 5));
        assert_eq!(region.bounding_dimensions(), (3, 3, 3));
    }

    #[test]
    fn test_shell_membership() {
        let region = CuboidRegion::new((0, 0, 0), (2, 2, 2));
        assert!(region.is_on_walls(BlockPosition::new(0, 1, 1)));
        assert!(!region.is_on_walls(BlockPosition::new(1, 0, 1)));
        assert!(region.is_on_shell(BlockPosition::new(1, 0, 1)));
        assert!(!region.is_on_shell(BlockPosition::new(1, 1, 1)));
        assert!(!region.is_on_shell(BlockPosition::new(3, 1, 1)));
    }

    #[test]
    fn test_columns() {
        let region = CuboidRegion::new((0, 5, 0), (1, 9, 2));
        assert_eq!(region.columns().len(), 6);
        assert_eq!(region.columns()[1], (1, 0));
    }

    #[test]
    fn test_iteration_at_the_edge_of_the_coordinate_range() {
        let region = CuboidRegion::new((i32::MAX - 1, 0, i32::MAX), (i32::MAX, 1, i32::MAX));
        let points: Vec<(i32, i32, i32)> = region.iter().map(Into::into).collect();
        assert_eq!(
            points,
            vec![
                (i32::MAX - 1, 0, i32::MAX),
                (i32::MAX, 0, i32::MAX),
                (i32::MAX - 1, 1, i32::MAX),
                (i32::MAX, 1, i32::MAX),
            ]
        );
    }
}
