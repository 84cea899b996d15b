use super::{Region, RegionIter};
use crate::block_position::BlockPosition;
use crate::bounding_box::BoundingBox;
use rustc_hash::FxHashSet;

/// An explicit collection of coordinates. Duplicates are dropped and the
/// first-insertion order is kept for iteration.
#[derive(Debug, Clone, Default)]
pub struct PointSetRegion {
    points: Vec<BlockPosition>,
    members: FxHashSet<BlockPosition>,
    bounds: Option<BoundingBox>,
}

impl PointSetRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the point was already present.
    pub fn insert(&mut self, pos: BlockPosition) -> bool {
        if !self.members.insert(pos) {
            return false;
        }
        self.points.push(pos);
        let point_box = BoundingBox::new(pos.into(), pos.into());
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.union(&point_box),
            None => point_box,
        });
        true
    }

    pub fn points(&self) -> &[BlockPosition] {
        &self.points
    }

    pub fn translate(&self, offset: BlockPosition) -> PointSetRegion {
        self.points.iter().map(|&p| p + offset).collect()
    }
}

impl FromIterator<BlockPosition> for PointSetRegion {
    fn from_iter<I: IntoIterator<Item = BlockPosition>>(iter: I) -> Self {
        let mut region = PointSetRegion::new();
        for pos in iter {
            region.insert(pos);
        }
        region
    }
}

impl PartialEq for PointSetRegion {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl Region for PointSetRegion {
    fn contains(&self, pos: BlockPosition) -> bool {
        self.members.contains(&pos)
    }

    fn iter(&self) -> RegionIter<'_> {
        RegionIter::Points(self.points.iter())
    }

    fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    fn volume(&self) -> usize {
        self.points.len()
    }

    fn columns(&self) -> Vec<(i32, i32)> {
        let mut seen = FxHashSet::default();
        self.points
            .iter()
            .map(|p| (p.x, p.z))
            .filter(|column| seen.insert(*column))
            .collect()
    }
}
