use crate::block_position::BlockPosition;
use crate::bounding_box::BoundingBox;
use crate::patterns::{Pattern, SingleBlockPattern, WeightedPattern};
use crate::regions::{CuboidRegion, PointSetRegion, Region, RegionIter};
use crate::BlockState;
use rand::Rng;

// ============================================================================
// Delegate macro for RegionEnum
// ============================================================================

macro_rules! delegate_region {
    ($self:expr, $method:ident $(, $arg:expr)*) => {
        match $self {
            RegionEnum::Cuboid(r) => r.$method($($arg),*),
            RegionEnum::PointSet(r) => r.$method($($arg),*),
        }
    };
}

// ============================================================================
// Regions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum RegionEnum {
    Cuboid(CuboidRegion),
    PointSet(PointSetRegion),
}

impl RegionEnum {
    /// The same region displaced by `offset`. Cuboids stay cuboids.
    pub fn translated(&self, offset: BlockPosition) -> RegionEnum {
        match self {
            RegionEnum::Cuboid(r) => RegionEnum::Cuboid(r.translate(offset)),
            RegionEnum::PointSet(r) => RegionEnum::PointSet(r.translate(offset)),
        }
    }
}

impl Region for RegionEnum {
    fn contains(&self, pos: BlockPosition) -> bool {
        delegate_region!(self, contains, pos)
    }

    fn iter(&self) -> RegionIter<'_> {
        delegate_region!(self, iter)
    }

    fn bounds(&self) -> Option<BoundingBox> {
        delegate_region!(self, bounds)
    }

    fn volume(&self) -> usize {
        delegate_region!(self, volume)
    }

    fn columns(&self) -> Vec<(i32, i32)> {
        delegate_region!(self, columns)
    }
}

impl From<CuboidRegion> for RegionEnum {
    fn from(region: CuboidRegion) -> Self {
        RegionEnum::Cuboid(region)
    }
}

impl From<PointSetRegion> for RegionEnum {
    fn from(region: PointSetRegion) -> Self {
        RegionEnum::PointSet(region)
    }
}

// ============================================================================
// Patterns
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PatternEnum {
    Single(SingleBlockPattern),
    Weighted(WeightedPattern),
}

impl Pattern for PatternEnum {
    fn resolve<R: Rng + ?Sized>(&self, pos: BlockPosition, rng: &mut R) -> BlockState {
        match self {
            PatternEnum::Single(p) => p.resolve(pos, rng),
            PatternEnum::Weighted(p) => p.resolve(pos, rng),
        }
    }
}

impl From<BlockState> for PatternEnum {
    fn from(block: BlockState) -> Self {
        PatternEnum::Single(SingleBlockPattern::new(block))
    }
}
