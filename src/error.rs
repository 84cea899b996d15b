use crate::block_position::BlockPosition;

/// Failure reported by a [`BlockAccessor`](crate::world::BlockAccessor)
/// for a single coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessorError {
    #[error("chunk containing {0} is not loaded")]
    Unloaded(BlockPosition),
    #[error("block at {0} cannot be modified")]
    ReadOnly(BlockPosition),
    #[error("accessor error: {0}")]
    Other(String),
}

/// Error type for edit operations.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Invalid region: {0}")]
    InvalidRegion(String),
    /// The change budget ran out part way through. `affected` writes were
    /// applied and stay recorded in the undo history.
    #[error("Block change limit of {limit} reached after {affected} block(s)")]
    BlockLimitExceeded { limit: usize, affected: usize },
    #[error("Unknown block: {0}")]
    UnknownBlock(String),
    #[error("Nothing left to undo")]
    UndoUnavailable,
    #[error("Nothing left to redo")]
    RedoUnavailable,
    #[error("Block access failed at {position}")]
    Accessor {
        position: BlockPosition,
        #[source]
        source: AccessorError,
    },
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for EditError {
    fn from(err: serde_json::Error) -> Self {
        EditError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
