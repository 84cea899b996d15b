use crate::block_position::BlockPosition;
use crate::error::{AccessorError, EditError, Result};

/// How an operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditStatus {
    Completed,
    /// The session's change budget ran out. Writes made before that point
    /// are kept and recorded.
    LimitExceeded { limit: usize },
    /// The accessor failed at `position`; earlier writes are kept.
    AccessorFailed {
        position: BlockPosition,
        source: AccessorError,
    },
}

/// Result of a bulk operation: the number of write attempts made and how
/// the operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditReport {
    pub affected: usize,
    pub status: EditStatus,
}

impl EditReport {
    pub fn completed(affected: usize) -> Self {
        Self {
            affected,
            status: EditStatus::Completed,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == EditStatus::Completed
    }

    /// `Ok(affected)` when the operation ran to the end. A limit abort maps
    /// to [`EditError::BlockLimitExceeded`], which still carries the partial
    /// count.
    pub fn into_result(self) -> Result<usize> {
        match self.status {
            EditStatus::Completed => Ok(self.affected),
            EditStatus::LimitExceeded { limit } => Err(EditError::BlockLimitExceeded {
                limit,
                affected: self.affected,
            }),
            EditStatus::AccessorFailed { position, source } => {
                Err(EditError::Accessor { position, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        assert_eq!(EditReport::completed(4).into_result().unwrap(), 4);

        let limited = EditReport {
            affected: 10,
            status: EditStatus::LimitExceeded { limit: 10 },
        };
        assert!(!limited.is_complete());
        assert!(matches!(
            limited.into_result(),
            Err(EditError::BlockLimitExceeded {
                limit: 10,
                affected: 10
            })
        ));

        let pos = BlockPosition::new(1, 2, 3);
        let failed = EditReport {
            affected: 0,
            status: EditStatus::AccessorFailed {
                position: pos,
                source: AccessorError::Unloaded(pos),
            },
        };
        assert!(matches!(
            failed.into_result(),
            Err(EditError::Accessor { position, .. }) if position == pos
        ));
    }
}
