//! Transactional bulk editing on top of a [`BlockAccessor`].
//!
//! Every public mutating operation becomes exactly one [`ChangeBatch`] in the
//! session history, including operations that stop early on the change limit
//! or an accessor failure. The affected count of an operation is the number
//! of write attempts that reached the accessor, whether or not the written
//! block differs from what was there.

mod history;
mod report;
mod transform;
mod writer;

pub use history::{ChangeBatch, ChangeRecord, History};
pub use report::{EditReport, EditStatus};

pub(crate) use writer::{ChangeWriter, Interrupt};

use crate::block_position::BlockPosition;
use crate::config::EditConfig;
use crate::error::{EditError, Result};
use crate::filters::{HeightMapFilter, Kernel};
use crate::height_map::HeightMap;
use crate::mask::BlockMask;
use crate::patterns::Pattern;
use crate::regions::{CuboidRegion, Region};
use crate::world::BlockAccessor;
use crate::BlockState;
use log::{debug, warn};
use rand::Rng;

pub struct EditSession<W: BlockAccessor> {
    world: W,
    config: EditConfig,
    max_changes: Option<usize>,
    changes_applied: usize,
    history: History,
}

impl<W: BlockAccessor> EditSession<W> {
    pub fn new(world: W) -> Self {
        Self::with_config(world, EditConfig::default())
    }

    pub fn with_config(world: W, config: EditConfig) -> Self {
        Self {
            world,
            max_changes: config.effective_max_changes(),
            history: History::new(&config.history),
            changes_applied: 0,
            config,
        }
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn into_inner(self) -> W {
        self.world
    }

    pub fn max_changes(&self) -> Option<usize> {
        self.max_changes
    }

    /// `None` or `Some(0)` removes the limit.
    pub fn set_max_changes(&mut self, max_changes: Option<usize>) {
        self.max_changes = max_changes.filter(|&limit| limit > 0);
    }

    /// Writes made by this session so far, across all operations.
    pub fn changes_applied(&self) -> usize {
        self.changes_applied
    }

    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Reads a block. Positions outside the world's height range read as air.
    pub fn get_block(&self, pos: BlockPosition) -> Result<BlockState> {
        let (min_y, max_y) = self.world.height_range();
        if pos.y < min_y || pos.y > max_y {
            return Ok(BlockState::air());
        }
        self.world
            .get_block(pos)
            .map_err(|source| EditError::Accessor {
                position: pos,
                source,
            })
    }

    /// Runs `body` as one operation: its writes form one history batch and
    /// the way it ended becomes the report status.
    pub(crate) fn perform<F>(&mut self, label: &'static str, body: F) -> EditReport
    where
        F: FnOnce(&mut ChangeWriter<'_, W>) -> std::result::Result<(), Interrupt>,
    {
        let mut batch = ChangeBatch::new(label);
        let (outcome, affected) = {
            let mut writer = ChangeWriter::new(
                &mut self.world,
                &mut batch,
                &mut self.changes_applied,
                self.max_changes,
            );
            let outcome = body(&mut writer);
            (outcome, writer.affected())
        };
        batch.seal();
        self.history.push(batch);

        let status = match outcome {
            Ok(()) => EditStatus::Completed,
            Err(Interrupt::LimitExceeded(limit)) => {
                warn!("{} stopped at the change limit of {}", label, limit);
                EditStatus::LimitExceeded { limit }
            }
            Err(Interrupt::Accessor(position, source)) => {
                warn!("{} stopped: {} ({})", label, source, position);
                EditStatus::AccessorFailed { position, source }
            }
        };
        debug!("{}: {} block(s) affected", label, affected);
        EditReport { affected, status }
    }

    /// Sets every block in the region from the pattern.
    pub fn set_blocks<R, P, G>(&mut self, region: &R, pattern: &P, rng: &mut G) -> EditReport
    where
        R: Region + ?Sized,
        P: Pattern,
        G: Rng + ?Sized,
    {
        debug!("set_blocks over {} position(s)", region.volume());
        self.perform("set", |w| {
            for pos in region.iter() {
                let block = pattern.resolve(pos, &mut *rng);
                w.set_block(pos, &block)?;
            }
            Ok(())
        })
    }

    /// Sets every block in the region to one block.
    pub fn set_blocks_to<R>(&mut self, region: &R, block: &BlockState) -> EditReport
    where
        R: Region + ?Sized,
    {
        debug!("set_blocks_to {} over {} position(s)", block, region.volume());
        self.perform("set", |w| {
            for pos in region.iter() {
                w.set_block(pos, block)?;
            }
            Ok(())
        })
    }

    /// Replaces the blocks whose current name is in `from` (every block when
    /// `from` is `None`) with blocks from the pattern.
    pub fn replace_blocks<R, P, G>(
        &mut self,
        region: &R,
        from: Option<&BlockMask>,
        pattern: &P,
        rng: &mut G,
    ) -> EditReport
    where
        R: Region + ?Sized,
        P: Pattern,
        G: Rng + ?Sized,
    {
        self.perform("replace", |w| {
            for pos in region.iter() {
                if let Some(mask) = from {
                    if !mask.matches(&w.get_block(pos)?) {
                        continue;
                    }
                }
                let block = pattern.resolve(pos, &mut *rng);
                w.set_block(pos, &block)?;
            }
            Ok(())
        })
    }

    pub fn replace_blocks_to<R>(
        &mut self,
        region: &R,
        from: Option<&BlockMask>,
        block: &BlockState,
    ) -> EditReport
    where
        R: Region + ?Sized,
    {
        self.perform("replace", |w| {
            for pos in region.iter() {
                if let Some(mask) = from {
                    if !mask.matches(&w.get_block(pos)?) {
                        continue;
                    }
                }
                w.set_block(pos, block)?;
            }
            Ok(())
        })
    }

    /// Places `block` on top of the highest non-air block of every column,
    /// looking only within the region's vertical extent. Columns without
    /// such a block are left alone.
    pub fn overlay_cuboid_blocks<R>(&mut self, region: &R, block: &BlockState) -> Result<EditReport>
    where
        R: Region + ?Sized,
    {
        let bounds = region
            .bounds()
            .ok_or_else(|| EditError::InvalidRegion("region is empty".to_string()))?;
        let (min_y, max_y) = (bounds.min.1, bounds.max.1);
        let columns = region.columns();

        Ok(self.perform("overlay", |w| {
            for (x, z) in columns {
                for y in (min_y..=max_y).rev() {
                    let pos = BlockPosition::new(x, y, z);
                    if !region.contains(pos) {
                        continue;
                    }
                    if !w.get_block(pos)?.is_air() {
                        w.set_block(pos.with_y(y + 1), block)?;
                        break;
                    }
                }
            }
            Ok(())
        }))
    }

    /// Builds the four vertical faces of the region's bounding cuboid.
    pub fn make_cuboid_walls<R>(&mut self, region: &R, block: &BlockState) -> Result<EditReport>
    where
        R: Region + ?Sized,
    {
        let cuboid = bounding_cuboid(region)?;
        Ok(self.perform("walls", |w| {
            for y in cuboid.min.y..=cuboid.max.y {
                for pos in layer_ring(&cuboid, y) {
                    w.set_block(pos, block)?;
                }
            }
            Ok(())
        }))
    }

    /// Builds all six faces of the region's bounding cuboid, leaving the
    /// interior untouched.
    pub fn make_cuboid_faces<R>(&mut self, region: &R, block: &BlockState) -> Result<EditReport>
    where
        R: Region + ?Sized,
    {
        let cuboid = bounding_cuboid(region)?;
        Ok(self.perform("faces", |w| {
            for y in cuboid.min.y..=cuboid.max.y {
                if y == cuboid.min.y || y == cuboid.max.y {
                    for z in cuboid.min.z..=cuboid.max.z {
                        for x in cuboid.min.x..=cuboid.max.x {
                            w.set_block(BlockPosition::new(x, y, z), block)?;
                        }
                    }
                } else {
                    for pos in layer_ring(&cuboid, y) {
                        w.set_block(pos, block)?;
                    }
                }
            }
            Ok(())
        }))
    }

    /// Smooths terrain elevation with the configured Gaussian kernel.
    /// `iterations` defaults to the configured count.
    pub fn smooth<R>(&mut self, region: &R, iterations: Option<u32>) -> Result<EditReport>
    where
        R: Region + ?Sized,
    {
        let settings = self.config.smoothing.clone();
        let filter = HeightMapFilter::new(Kernel::gaussian(settings.radius, settings.sigma)?);
        let height_map = HeightMap::capture(self, region)?;
        height_map.apply_filter(self, &filter, iterations.unwrap_or(settings.iterations))
    }

    /// Reverts the most recent batch. Returns the number of records reverted.
    ///
    /// If the accessor fails part way, the batch stays on the undo stack so
    /// the undo can be retried.
    pub fn undo(&mut self) -> Result<usize> {
        let batch = self.history.pop_undo().ok_or(EditError::UndoUnavailable)?;
        let result = replay(
            &mut self.world,
            batch
                .records()
                .iter()
                .rev()
                .map(|r| (r.position, &r.previous)),
        );
        match result {
            Ok(count) => {
                debug!("Undid '{}' ({} block(s))", batch.label(), count);
                self.history.push_redo(batch);
                Ok(count)
            }
            Err(err) => {
                self.history.restore_undo(batch);
                Err(err)
            }
        }
    }

    /// Re-applies the most recently undone batch.
    pub fn redo(&mut self) -> Result<usize> {
        let batch = self.history.pop_redo().ok_or(EditError::RedoUnavailable)?;
        let result = replay(
            &mut self.world,
            batch.records().iter().map(|r| (r.position, &r.current)),
        );
        match result {
            Ok(count) => {
                debug!("Redid '{}' ({} block(s))", batch.label(), count);
                self.history.redone(batch);
                Ok(count)
            }
            Err(err) => {
                self.history.push_redo(batch);
                Err(err)
            }
        }
    }
}

fn replay<'r, W: BlockAccessor>(
    world: &mut W,
    changes: impl Iterator<Item = (BlockPosition, &'r BlockState)>,
) -> Result<usize> {
    let mut count = 0;
    for (position, block) in changes {
        world
            .set_block(position, block)
            .map_err(|source| EditError::Accessor { position, source })?;
        count += 1;
    }
    Ok(count)
}

pub(crate) fn bounding_cuboid<R: Region + ?Sized>(region: &R) -> Result<CuboidRegion> {
    region
        .bounds()
        .map(CuboidRegion::from_bounding_box)
        .ok_or_else(|| EditError::InvalidRegion("region is empty".to_string()))
}

/// Positions of one horizontal layer that lie on the four vertical faces,
/// each listed once.
fn layer_ring(cuboid: &CuboidRegion, y: i32) -> Vec<BlockPosition> {
    let (min, max) = (cuboid.min, cuboid.max);
    let mut ring = Vec::new();
    for x in min.x..=max.x {
        ring.push(BlockPosition::new(x, y, min.z));
    }
    if max.z > min.z {
        for x in min.x..=max.x {
            ring.push(BlockPosition::new(x, y, max.z));
        }
    }
    for z in (min.z + 1)..max.z {
        ring.push(BlockPosition::new(min.x, y, z));
        if max.x > min.x {
            ring.push(BlockPosition::new(max.x, y, z));
        }
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::MemoryWorld;

    #[test]
    fn test_layer_ring_has_no_duplicates() {
        let cuboid = CuboidRegion::new((0, 0, 0), (3, 0, 2));
        let ring = layer_ring(&cuboid, 0);
        assert_eq!(ring.len(), 2 * 4 + 2 * 3 - 4);
        let unique: rustc_hash::FxHashSet<_> = ring.iter().collect();
        assert_eq!(unique.len(), ring.len());
        assert!(ring.iter().all(|&p| cuboid.is_on_walls(p)));
    }

    #[test]
    fn test_layer_ring_of_thin_cuboids() {
        assert_eq!(layer_ring(&CuboidRegion::new((0, 0, 0), (0, 0, 0)), 0).len(), 1);
        assert_eq!(layer_ring(&CuboidRegion::new((0, 0, 0), (4, 0, 0)), 0).len(), 5);
        assert_eq!(layer_ring(&CuboidRegion::new((0, 0, 0), (0, 0, 4)), 0).len(), 5);
    }

    #[test]
    fn test_limit_counts_across_operations() {
        let mut session = EditSession::new(MemoryWorld::new(0, 255));
        session.set_max_changes(Some(10));
        let stone = BlockState::new("minecraft:stone");

        let first = session.set_blocks_to(&CuboidRegion::new((0, 0, 0), (1, 1, 1)), &stone);
        assert_eq!(first, EditReport::completed(8));

        let second = session.set_blocks_to(&CuboidRegion::new((0, 5, 0), (1, 6, 1)), &stone);
        assert_eq!(second.affected, 2);
        assert_eq!(second.status, EditStatus::LimitExceeded { limit: 10 });
        assert_eq!(session.changes_applied(), 10);
        assert_eq!(session.undo_len(), 2);
    }

    #[test]
    fn test_writes_outside_height_range_are_skipped() {
        let mut session = EditSession::new(MemoryWorld::new(0, 3));
        let report = session.set_blocks_to(
            &CuboidRegion::new((0, 2, 0), (0, 5, 0)),
            &BlockState::new("minecraft:stone"),
        );
        assert_eq!(report, EditReport::completed(2));
        assert!(session.get_block(BlockPosition::new(0, 9, 0)).unwrap().is_air());
    }
}
