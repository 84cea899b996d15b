use super::history::ChangeBatch;
use crate::block_position::BlockPosition;
use crate::error::AccessorError;
use crate::world::BlockAccessor;
use crate::BlockState;

/// Why an operation stopped before visiting every coordinate.
#[derive(Debug)]
pub(crate) enum Interrupt {
    LimitExceeded(usize),
    Accessor(BlockPosition, AccessorError),
}

/// Write handle given to an operation body. Every write goes through the
/// change budget and into the operation's batch.
pub(crate) struct ChangeWriter<'a, W: BlockAccessor> {
    world: &'a mut W,
    batch: &'a mut ChangeBatch,
    changes_applied: &'a mut usize,
    max_changes: Option<usize>,
    height_range: (i32, i32),
    affected: usize,
}

impl<'a, W: BlockAccessor> ChangeWriter<'a, W> {
    pub(crate) fn new(
        world: &'a mut W,
        batch: &'a mut ChangeBatch,
        changes_applied: &'a mut usize,
        max_changes: Option<usize>,
    ) -> Self {
        let height_range = world.height_range();
        Self {
            world,
            batch,
            changes_applied,
            max_changes,
            height_range,
            affected: 0,
        }
    }

    fn in_height_range(&self, y: i32) -> bool {
        y >= self.height_range.0 && y <= self.height_range.1
    }

    /// Outside the world's height range everything reads as air.
    pub(crate) fn get_block(&self, pos: BlockPosition) -> Result<BlockState, Interrupt> {
        if !self.in_height_range(pos.y) {
            return Ok(BlockState::air());
        }
        self.world
            .get_block(pos)
            .map_err(|e| Interrupt::Accessor(pos, e))
    }

    /// Writes and records one block. Returns `false` without counting when
    /// the position is outside the world's height range.
    pub(crate) fn set_block(
        &mut self,
        pos: BlockPosition,
        block: &BlockState,
    ) -> Result<bool, Interrupt> {
        if !self.in_height_range(pos.y) {
            return Ok(false);
        }
        if let Some(limit) = self.max_changes {
            if *self.changes_applied >= limit {
                return Err(Interrupt::LimitExceeded(limit));
            }
        }

        let previous = self
            .world
            .get_block(pos)
            .map_err(|e| Interrupt::Accessor(pos, e))?;
        self.world
            .set_block(pos, block)
            .map_err(|e| Interrupt::Accessor(pos, e))?;
        self.batch.record(pos, previous, block.clone());
        *self.changes_applied += 1;
        self.affected += 1;
        Ok(true)
    }

    pub(crate) fn affected(&self) -> usize {
        self.affected
    }
}
