use crate::block_position::BlockPosition;
use crate::error::AccessorError;
use crate::BlockState;
use rustc_hash::{FxHashMap, FxHashSet};

pub const DEFAULT_MIN_Y: i32 = -64;
pub const DEFAULT_MAX_Y: i32 = 319;

/// Read/write access to a live world, supplied by the host.
///
/// The engine never locks anything: an accessor shared between sessions has
/// to be single-threaded or synchronized internally.
pub trait BlockAccessor {
    fn get_block(&self, pos: BlockPosition) -> Result<BlockState, AccessorError>;
    fn set_block(&mut self, pos: BlockPosition, block: &BlockState) -> Result<(), AccessorError>;
    /// Inclusive (min_y, max_y) of the buildable range.
    fn height_range(&self) -> (i32, i32);
}

impl<T: BlockAccessor + ?Sized> BlockAccessor for &mut T {
    fn get_block(&self, pos: BlockPosition) -> Result<BlockState, AccessorError> {
        (**self).get_block(pos)
    }

    fn set_block(&mut self, pos: BlockPosition, block: &BlockState) -> Result<(), AccessorError> {
        (**self).set_block(pos, block)
    }

    fn height_range(&self) -> (i32, i32) {
        (**self).height_range()
    }
}

impl<T: BlockAccessor + ?Sized> BlockAccessor for Box<T> {
    fn get_block(&self, pos: BlockPosition) -> Result<BlockState, AccessorError> {
        (**self).get_block(pos)
    }

    fn set_block(&mut self, pos: BlockPosition, block: &BlockState) -> Result<(), AccessorError> {
        (**self).set_block(pos, block)
    }

    fn height_range(&self) -> (i32, i32) {
        (**self).height_range()
    }
}

/// Sparse palette-indexed world kept in memory. Unset positions read as air.
#[derive(Debug, Clone)]
pub struct MemoryWorld {
    min_y: i32,
    max_y: i32,
    palette: Vec<BlockState>,
    palette_index: FxHashMap<BlockState, usize>,
    blocks: FxHashMap<BlockPosition, usize>,
    unloaded_chunks: FxHashSet<(i32, i32)>,
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_Y, DEFAULT_MAX_Y)
    }
}

impl MemoryWorld {
    const AIR_INDEX: usize = 0;

    pub fn new(min_y: i32, max_y: i32) -> Self {
        let air = BlockState::air();
        let mut palette_index = FxHashMap::default();
        palette_index.insert(air.clone(), Self::AIR_INDEX);
        Self {
            min_y: min_y.min(max_y),
            max_y: max_y.max(min_y),
            palette: vec![air],
            palette_index,
            blocks: FxHashMap::default(),
            unloaded_chunks: FxHashSet::default(),
        }
    }

    fn get_or_insert_in_palette(&mut self, block: &BlockState) -> usize {
        match self.palette_index.get(block) {
            Some(&index) => index,
            None => {
                let index = self.palette.len();
                self.palette.push(block.clone());
                self.palette_index.insert(block.clone(), index);
                index
            }
        }
    }

    fn chunk_of(pos: BlockPosition) -> (i32, i32) {
        (pos.x >> 4, pos.z >> 4)
    }

    fn check_loaded(&self, pos: BlockPosition) -> Result<(), AccessorError> {
        if self.unloaded_chunks.contains(&Self::chunk_of(pos)) {
            return Err(AccessorError::Unloaded(pos));
        }
        Ok(())
    }

    /// Makes every access inside the 16x16 chunk column fail, the way an
    /// unloaded chunk would on a live server.
    pub fn unload_chunk(&mut self, chunk_x: i32, chunk_z: i32) {
        self.unloaded_chunks.insert((chunk_x, chunk_z));
    }

    pub fn load_chunk(&mut self, chunk_x: i32, chunk_z: i32) {
        self.unloaded_chunks.remove(&(chunk_x, chunk_z));
    }

    /// Block at `pos`, air when never set.
    pub fn block_at(&self, pos: impl Into<BlockPosition>) -> &BlockState {
        let index = self
            .blocks
            .get(&pos.into())
            .copied()
            .unwrap_or(Self::AIR_INDEX);
        &self.palette[index]
    }

    /// Direct write that bypasses load state and history, for setting up
    /// fixtures.
    pub fn put(&mut self, pos: impl Into<BlockPosition>, block: &BlockState) {
        let pos = pos.into();
        let index = self.get_or_insert_in_palette(block);
        if index == Self::AIR_INDEX {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, index);
        }
    }

    pub fn count_non_air_blocks(&self) -> usize {
        self.blocks
            .values()
            .filter(|&&index| !self.palette[index].is_air())
            .count()
    }

    pub fn count_blocks_named(&self, name: &str) -> usize {
        self.blocks
            .values()
            .filter(|&&index| self.palette[index].name == name)
            .count()
    }

    pub fn get_palette(&self) -> &[BlockState] {
        &self.palette
    }
}

impl BlockAccessor for MemoryWorld {
    fn get_block(&self, pos: BlockPosition) -> Result<BlockState, AccessorError> {
        self.check_loaded(pos)?;
        Ok(self.block_at(pos).clone())
    }

    fn set_block(&mut self, pos: BlockPosition, block: &BlockState) -> Result<(), AccessorError> {
        self.check_loaded(pos)?;
        if pos.y < self.min_y || pos.y > self.max_y {
            return Err(AccessorError::ReadOnly(pos));
        }
        self.put(pos, block);
        Ok(())
    }

    fn height_range(&self) -> (i32, i32) {
        (self.min_y, self.max_y)
    }
}
