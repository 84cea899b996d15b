use crate::block_position::BlockPosition;
use crate::enums::PatternEnum;
use crate::error::EditError;
use crate::BlockState;
use rand::Rng;
use std::str::FromStr;

pub trait Pattern {
    /// Get the block to place at the given coordinates.
    ///
    /// Must depend only on the coordinates and on what is drawn from `rng`.
    fn resolve<R: Rng + ?Sized>(&self, pos: BlockPosition, rng: &mut R) -> BlockState;
}

/// A pattern that places a single specific block
#[derive(Debug, Clone, PartialEq)]
pub struct SingleBlockPattern {
    block: BlockState,
}

impl SingleBlockPattern {
    pub fn new(block: BlockState) -> Self {
        Self { block }
    }

    pub fn block(&self) -> &BlockState {
        &self.block
    }
}

impl Pattern for SingleBlockPattern {
    fn resolve<R: Rng + ?Sized>(&self, _pos: BlockPosition, _rng: &mut R) -> BlockState {
        self.block.clone()
    }
}

/// A pattern that picks one of several blocks with given relative weights.
///
/// Weights are normalized on construction. A draw `u` in [0, 1) selects the
/// entry whose half-open cumulative interval `[lo, hi)` contains it, so a
/// draw landing exactly on a boundary belongs to the later entry.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPattern {
    entries: Vec<(BlockState, f64)>,
    cumulative: Vec<f64>,
}

impl WeightedPattern {
    pub fn new(entries: Vec<(BlockState, f64)>) -> Result<Self, EditError> {
        if entries.is_empty() {
            return Err(EditError::InvalidPattern(
                "weighted pattern needs at least one block".to_string(),
            ));
        }
        if let Some((block, weight)) = entries
            .iter()
            .find(|(_, w)| !w.is_finite() || *w < 0.0)
        {
            return Err(EditError::InvalidPattern(format!(
                "weight {} for {} is not a non-negative number",
                weight, block
            )));
        }
        let total: f64 = entries.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return Err(EditError::InvalidPattern(
                "weights must not all be zero".to_string(),
            ));
        }

        let mut running = 0.0;
        let mut cumulative: Vec<f64> = entries
            .iter()
            .map(|(_, w)| {
                running += w / total;
                running
            })
            .collect();
        // Pin the last positive interval to 1.0 so rounding can never leave
        // a gap at the top of [0, 1).
        if let Some(last) = entries.iter().rposition(|(_, w)| *w > 0.0) {
            for c in &mut cumulative[last..] {
                *c = 1.0;
            }
        }

        Ok(Self {
            entries,
            cumulative,
        })
    }

    pub fn entries(&self) -> &[(BlockState, f64)] {
        &self.entries
    }

    /// Normalized probability of each entry, in the given order.
    pub fn probabilities(&self) -> Vec<f64> {
        let mut previous = 0.0;
        self.cumulative
            .iter()
            .map(|&c| {
                let p = c - previous;
                previous = c;
                p
            })
            .collect()
    }

    /// Index of the entry selected by a draw in [0, 1).
    pub fn select(&self, draw: f64) -> usize {
        self.cumulative
            .iter()
            .position(|&upper| draw < upper)
            .unwrap_or(self.cumulative.len() - 1)
    }
}

impl Pattern for WeightedPattern {
    fn resolve<R: Rng + ?Sized>(&self, _pos: BlockPosition, rng: &mut R) -> BlockState {
        let draw: f64 = rng.gen();
        self.entries[self.select(draw)].0.clone()
    }
}

impl FromStr for PatternEnum {
    type Err = EditError;

    /// Parses `stone` or a weighted list such as `60%stone,40%dirt,sand`.
    /// Entries without a percentage get weight 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let items: Vec<&str> = s.split(',').map(str::trim).collect();
        if items.len() == 1 && !items[0].contains('%') {
            return Ok(PatternEnum::Single(SingleBlockPattern::new(
                items[0].parse()?,
            )));
        }

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let (weight, block) = match item.split_once('%') {
                Some((weight, block)) => {
                    let weight: f64 = weight.trim().parse().map_err(|_| {
                        EditError::InvalidPattern(format!("bad weight in '{}'", item))
                    })?;
                    (weight, block)
                }
                None => (1.0, item),
            };
            entries.push((block.parse::<BlockState>()?, weight));
        }
        Ok(PatternEnum::Weighted(WeightedPattern::new(entries)?))
    }
}
