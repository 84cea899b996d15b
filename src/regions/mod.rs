mod cuboid;
mod point_set;

pub use cuboid::{CuboidIter, CuboidRegion};
pub use point_set::PointSetRegion;

use crate::block_position::BlockPosition;
use crate::bounding_box::BoundingBox;

/// The set of coordinates an edit applies to.
///
/// Iteration order is fixed for a given instance: cuboids walk x fastest,
/// then z, then y; point sets keep insertion order. Undo replay depends on
/// that order being reproducible.
pub trait Region {
    fn contains(&self, pos: BlockPosition) -> bool;
    /// Restartable iteration over every member coordinate.
    fn iter(&self) -> RegionIter<'_>;
    /// `None` for an empty region.
    fn bounds(&self) -> Option<BoundingBox>;
    fn volume(&self) -> usize;

    /// (width, height, length) of the bounding box, zero when empty.
    fn bounding_dimensions(&self) -> (i32, i32, i32) {
        self.bounds()
            .map(|b| b.get_dimensions())
            .unwrap_or((0, 0, 0))
    }

    fn is_empty(&self) -> bool {
        self.volume() == 0
    }

    /// Distinct (x, z) columns covered by the region, in iteration order.
    fn columns(&self) -> Vec<(i32, i32)>;
}

pub enum RegionIter<'a> {
    Cuboid(CuboidIter),
    Points(std::slice::Iter<'a, BlockPosition>),
}

impl Iterator for RegionIter<'_> {
    type Item = BlockPosition;

    fn next(&mut self) -> Option<BlockPosition> {
        match self {
            RegionIter::Cuboid(it) => it.next(),
            RegionIter::Points(it) => it.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            RegionIter::Cuboid(it) => it.size_hint(),
            RegionIter::Points(it) => it.size_hint(),
        }
    }
}
