use thiserror::Error;

use crate::types::PieceRecord;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("turn {index} out of range for history of {len} turns")]
    OutOfRange { index: usize, len: usize },
    #[error("history must hold at least one turn")]
    Empty,
}

/// Every live piece at one point of the game.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Turn {
    pub pieces: Vec<PieceRecord>,
}

impl Turn {
    pub fn new(pieces: Vec<PieceRecord>) -> Self {
        Self { pieces }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl FromIterator<PieceRecord> for Turn {
    fn from_iter<I: IntoIterator<Item = PieceRecord>>(iter: I) -> Self {
        Self {
            pieces: iter.into_iter().collect(),
        }
    }
}

/// Linear timeline of turns with a cursor. Recording from the middle of the
/// timeline discards every turn after the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnHistory {
    turns: Vec<Turn>,
    cursor: usize,
}

impl TurnHistory {
    pub fn new(initial: Turn) -> Self {
        Self {
            turns: vec![initial],
            cursor: 0,
        }
    }

    pub fn from_turns(turns: Vec<Turn>) -> Result<Self, HistoryError> {
        if turns.is_empty() {
            return Err(HistoryError::Empty);
        }
        let cursor = turns.len() - 1;
        Ok(Self { turns, cursor })
    }

    pub fn record(&mut self, turn: Turn) {
        self.turns.truncate(self.cursor + 1);
        self.turns.push(turn);
        self.cursor += 1;
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn next(&mut self) {
        if self.cursor + 1 < self.turns.len() {
            self.cursor += 1;
        }
    }

    pub fn last(&mut self) {
        self.cursor = self.turns.len() - 1;
    }

    pub fn first_noop(&self) -> bool {
        self.cursor == 0
    }

    pub fn prev_noop(&self) -> bool {
        self.first_noop()
    }

    pub fn next_noop(&self) -> bool {
        self.last_noop()
    }

    pub fn last_noop(&self) -> bool {
        self.cursor == self.turns.len() - 1
    }

    pub fn go_to(&mut self, index: usize) -> Result<(), HistoryError> {
        if index >= self.turns.len() {
            return Err(HistoryError::OutOfRange {
                index,
                len: self.turns.len(),
            });
        }
        self.cursor = index;
        Ok(())
    }

    pub fn current(&self) -> Turn {
        self.turns[self.cursor].clone()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Fraction of the timeline up to and including the cursor.
    pub fn progress(&self) -> f64 {
        (self.cursor + 1) as f64 / self.turns.len() as f64
    }

    /// Swaps in a whole timeline and moves the cursor to its last turn.
    pub fn replace(&mut self, turns: Vec<Turn>) -> Result<(), HistoryError> {
        *self = Self::from_turns(turns)?;
        Ok(())
    }
}
