use crate::BlockState;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// A set of block names used to select which existing blocks an edit may
/// replace. Matching is by name only; properties are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockMask {
    names: FxHashSet<SmolStr>,
}

impl BlockMask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<SmolStr>) {
        self.names.insert(name.into());
    }

    pub fn matches(&self, block: &BlockState) -> bool {
        self.names.contains(&block.name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<SmolStr>> FromIterator<S> for BlockMask {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&[BlockState]> for BlockMask {
    fn from(blocks: &[BlockState]) -> Self {
        blocks.iter().map(|b| b.name.clone()).collect()
    }
}
