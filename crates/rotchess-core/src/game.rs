use rand::Rng;
use thiserror::Error;

use crate::board::{Board, BoardError, MoveOutcome};
use crate::config::GameConfig;
use crate::dial::{RotationDial, RotationSelector};
use crate::geometry::Point;
use crate::history::{HistoryError, TurnHistory};
use crate::save::{self, SaveError};
use crate::types::{PieceId, SetupMode};

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The selected piece moved and a turn was recorded.
    Moved(MoveOutcome),
    /// Pieces under the cursor were toggled; `selected` is the new selection.
    SelectionChanged { selected: Vec<PieceId> },
    Nothing,
}

/// One game session: the live board, its recorded timeline and the rotation dial.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    history: TurnHistory,
    dial: RotationDial,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let board = match config.setup {
            SetupMode::Standard => Board::standard(config),
            SetupMode::Chess960 => Board::chess960(config, rng),
        };
        Self::from_board(board)
    }

    pub fn from_board(board: Board) -> Self {
        let config = *board.config();
        Self {
            config,
            history: TurnHistory::new(board.snapshot()),
            dial: RotationDial::new(Point::from(config.dial_center), config.dial_radius),
            board,
        }
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn history(&self) -> &TurnHistory {
        &self.history
    }

    pub const fn dial(&self) -> &RotationDial {
        &self.dial
    }

    pub fn progress(&self) -> f64 {
        self.history.progress()
    }

    /// Points the sole selected piece can currently reach, previews included.
    pub fn reachable_points(&self) -> Vec<Point> {
        self.board
            .only_selected()
            .and_then(|id| self.board.get(id))
            .map(|piece| piece.movable_points().collect())
            .unwrap_or_default()
    }

    fn record_turn(&mut self) {
        self.history.record(self.board.snapshot());
    }

    /// Board click. Plays a move when the sole selected piece can reach a point
    /// under the cursor, otherwise toggles every piece under it.
    pub fn click(&mut self, x: f64, y: f64) -> Result<ClickOutcome, GameError> {
        if let Some(outcome) = self.try_move(x, y)? {
            self.record_turn();
            return Ok(ClickOutcome::Moved(outcome));
        }

        let hits = self.board.pieces_at(x, y);
        if hits.is_empty() {
            return Ok(ClickOutcome::Nothing);
        }
        for id in hits {
            let change = self.board.toggle_selection(id)?;
            if !change.selected {
                if !self.board.has_selection() {
                    self.dial.hide();
                }
                continue;
            }
            match change.evicted {
                Some(_) => {
                    self.dial.hide();
                    self.dial.reveal();
                }
                None => {
                    self.dial.reveal();
                    if let Some(angle) = self.dial.selected_angle() {
                        self.board.set_preview(id, angle)?;
                    }
                }
            }
        }
        Ok(ClickOutcome::SelectionChanged {
            selected: self.board.selected().to_vec(),
        })
    }

    fn try_move(&mut self, x: f64, y: f64) -> Result<Option<MoveOutcome>, GameError> {
        let Some(id) = self.board.only_selected() else {
            return Ok(None);
        };
        let piece = self.board.get(id).ok_or(BoardError::UnknownPiece(id))?;
        if piece.is_previewing() {
            return Ok(None);
        }
        let click = Point::new(x, y);
        let radius = self.config.collision_radius;
        let candidates: Vec<Point> = piece
            .movable_points()
            .filter(|point| point.distance_sq(click) < radius * radius)
            .collect();
        for point in candidates {
            if self.board.can_move(id, point.x, point.y)? {
                let outcome = self.board.move_piece(id, point.x, point.y, &mut self.dial)?;
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }

    /// Starts or continues a drag on the dial and previews the resulting angle
    /// on every selected piece.
    pub fn drag_rotation(&mut self, x: f64, y: f64) -> bool {
        let moved = if self.dial.is_dragging() {
            self.dial.drag_to(x, y)
        } else {
            self.dial.begin_drag(x, y)
        };
        if let (true, Some(angle)) = (moved, self.dial.selected_angle()) {
            self.board.preview_selected(angle);
        }
        moved
    }

    pub fn release_rotation(&mut self) {
        self.dial.end_drag();
    }

    /// Plays the previewed rotation of every selected piece as one turn.
    pub fn confirm_rotation(&mut self) -> Result<bool, GameError> {
        if !self.dial.confirm_visible() || !self.board.has_selection() {
            return Ok(false);
        }
        self.board.confirm_selected()?;
        self.dial.hide();
        self.record_turn();
        Ok(true)
    }

    pub fn cancel_rotation(&mut self) -> bool {
        if !self.dial.cancel_visible() {
            return false;
        }
        self.dial.hide();
        self.board.cancel_selected();
        true
    }

    fn navigate(&mut self, noop: bool, step: impl FnOnce(&mut TurnHistory)) -> bool {
        if self.board.has_selection() || noop {
            return false;
        }
        step(&mut self.history);
        self.board.restore(&self.history.current());
        true
    }

    pub fn first(&mut self) -> bool {
        let noop = self.history.first_noop();
        self.navigate(noop, TurnHistory::first)
    }

    pub fn prev(&mut self) -> bool {
        let noop = self.history.prev_noop();
        self.navigate(noop, TurnHistory::prev)
    }

    pub fn next(&mut self) -> bool {
        let noop = self.history.next_noop();
        self.navigate(noop, TurnHistory::next)
    }

    pub fn last(&mut self) -> bool {
        let noop = self.history.last_noop();
        self.navigate(noop, TurnHistory::last)
    }

    pub fn go_to(&mut self, index: usize) -> Result<bool, GameError> {
        if self.board.has_selection() {
            return Ok(false);
        }
        let before = self.history.cursor();
        self.history.go_to(index)?;
        if index == before {
            return Ok(false);
        }
        self.board.restore(&self.history.current());
        Ok(true)
    }

    pub fn export_save(&self) -> Result<String, GameError> {
        Ok(save::export(&self.history)?)
    }

    /// Replaces the whole timeline with a decoded save and shows its last turn.
    /// A rejected save leaves the session untouched.
    pub fn import_save(&mut self, text: &str) -> Result<(), GameError> {
        let turns = save::import(text)?;
        self.history.replace(turns)?;
        self.board.restore(&self.history.current());
        self.dial.hide();
        log::debug!("imported save with {} turns", self.history.len());
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::from_board(Board::standard(GameConfig::default()))
    }
}
