use crate::block_position::BlockPosition;
use crate::config::HistoryConfig;
use crate::BlockState;
use log::trace;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One block write: what was there before and what was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub position: BlockPosition,
    pub previous: BlockState,
    pub current: BlockState,
}

/// All changes made by one operation, undone and redone as a unit.
///
/// Repeated writes to the same position are folded into one record that
/// keeps the first `previous` and the latest `current`, so a batch never
/// holds more records than the operation touched distinct positions.
#[derive(Debug, Clone, Default)]
pub struct ChangeBatch {
    label: &'static str,
    records: Vec<ChangeRecord>,
    index: FxHashMap<BlockPosition, usize>,
}

impl ChangeBatch {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            records: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn record(&mut self, position: BlockPosition, previous: BlockState, current: BlockState) {
        match self.index.get(&position) {
            Some(&i) => {
                let first = std::mem::take(&mut self.records[i].previous);
                self.records[i] = ChangeRecord {
                    position,
                    previous: first,
                    current,
                };
            }
            None => {
                self.index.insert(position, self.records.len());
                self.records.push(ChangeRecord {
                    position,
                    previous,
                    current,
                });
            }
        }
    }

    /// Drops the lookup index once the batch is complete.
    pub(crate) fn seal(&mut self) {
        self.index = FxHashMap::default();
        self.records.shrink_to_fit();
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Undo and redo stacks of change batches, bounded by batch count and by
/// total retained records.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<ChangeBatch>,
    redo: Vec<ChangeBatch>,
    max_batches: usize,
    max_records: usize,
    undo_records: usize,
}

impl History {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_batches: config.max_batches.max(1),
            max_records: config.max_records,
            undo_records: 0,
        }
    }

    /// Remembers a freshly performed batch. Anything that could have been
    /// redone is discarded.
    pub fn push(&mut self, batch: ChangeBatch) {
        self.redo.clear();
        self.push_undo(batch);
    }

    fn push_undo(&mut self, batch: ChangeBatch) {
        self.undo_records += batch.len();
        self.undo.push_back(batch);
        self.evict();
    }

    fn evict(&mut self) {
        while self.undo.len() > self.max_batches
            || (self.undo_records > self.max_records && self.undo.len() > 1)
        {
            if let Some(oldest) = self.undo.pop_front() {
                self.undo_records -= oldest.len();
                trace!(
                    "Evicted '{}' batch of {} record(s) from history",
                    oldest.label(),
                    oldest.len()
                );
            }
        }
    }

    pub fn pop_undo(&mut self) -> Option<ChangeBatch> {
        let batch = self.undo.pop_back()?;
        self.undo_records -= batch.len();
        Some(batch)
    }

    /// Puts back a batch whose undo could not be completed.
    pub fn restore_undo(&mut self, batch: ChangeBatch) {
        self.undo_records += batch.len();
        self.undo.push_back(batch);
    }

    pub fn push_redo(&mut self, batch: ChangeBatch) {
        self.redo.push(batch);
        if self.redo.len() > self.max_batches {
            self.redo.remove(0);
        }
    }

    pub fn pop_redo(&mut self) -> Option<ChangeBatch> {
        self.redo.pop()
    }

    /// Moves a redone batch back onto the undo stack without touching the
    /// remaining redo entries.
    pub fn redone(&mut self, batch: ChangeBatch) {
        self.push_undo(batch);
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn retained_records(&self) -> usize {
        self.undo_records + self.redo.iter().map(ChangeBatch::len).sum::<usize>()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.undo_records = 0;
    }
}
