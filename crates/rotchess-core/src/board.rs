use crate::config::GameConfig;
use crate::constants::{cell_center, BACK_RANK, BOARD_CELLS};
use crate::dial::RotationSelector;
use crate::geometry::{line_distance, scalar_projection, Point};
use crate::history::Turn;
use crate::piece::{Piece, PieceError};
use crate::types::{PieceId, PieceRecord, PieceType, Side};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("no piece with id {0:?}")]
    UnknownPiece(PieceId),
    #[error("piece {0:?} is not the selected piece")]
    NotSelected(PieceId),
    #[error("expected exactly one selected piece, found {0}")]
    SelectionCount(usize),
    #[error(transparent)]
    Piece(#[from] PieceError),
}

/// Side, back rank row and pawn row.
const HOME_RANKS: [(Side, usize, usize); 2] = [
    (Side::Black, 0, 1),
    (Side::White, BOARD_CELLS - 1, BOARD_CELLS - 2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    /// Whether the toggled piece ended up selected.
    pub selected: bool,
    /// Piece dropped to keep single selection.
    pub evicted: Option<PieceId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    /// Id of the moved piece after the move. Differs from the mover's id when it promoted.
    pub piece: PieceId,
    pub captured: Vec<PieceRecord>,
    pub promoted: bool,
}

#[derive(Debug, Clone)]
pub struct Board {
    config: GameConfig,
    pieces: Vec<Piece>,
    selected: Vec<PieceId>,
    next_id: u64,
}

impl Board {
    pub fn empty(config: GameConfig) -> Self {
        Self {
            config,
            pieces: Vec::new(),
            selected: Vec::new(),
            next_id: 0,
        }
    }

    pub fn standard(config: GameConfig) -> Self {
        let mut board = Self::empty(config);
        for (file, piece_type) in BACK_RANK.into_iter().enumerate() {
            let x = cell_center(file);
            for (side, back, front) in HOME_RANKS {
                let angle = side.home_angle();
                board.add(PieceRecord::new(x, cell_center(back), angle, side, piece_type));
                board.add(PieceRecord::new(x, cell_center(front), angle, side, PieceType::Pawn));
            }
        }
        board
    }

    /// Back rank shuffled once and mirrored for both sides; every piece faces a
    /// random whole-degree angle.
    pub fn chess960<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let mut order = BACK_RANK;
        order.shuffle(rng);
        let mut board = Self::empty(config);
        let angle = |rng: &mut R| f64::from(rng.gen_range(-180i32..=180)).to_radians();
        for (file, piece_type) in order.into_iter().enumerate() {
            let x = cell_center(file);
            for (side, back, front) in HOME_RANKS {
                board.add(PieceRecord::new(x, cell_center(front), angle(rng), side, PieceType::Pawn));
                board.add(PieceRecord::new(x, cell_center(back), angle(rng), side, piece_type));
            }
        }
        board
    }

    pub fn from_records<I>(config: GameConfig, records: I) -> Self
    where
        I: IntoIterator<Item = PieceRecord>,
    {
        let mut board = Self::empty(config);
        for record in records {
            board.add(record);
        }
        board
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn add(&mut self, record: PieceRecord) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces
            .push(Piece::new(id, record, self.config.collision_radius));
        id
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id() == id)
    }

    fn index_of(&self, id: PieceId) -> Result<usize, BoardError> {
        self.pieces
            .iter()
            .position(|piece| piece.id() == id)
            .ok_or(BoardError::UnknownPiece(id))
    }

    /// Pieces whose hit circle contains `(x, y)`.
    pub fn pieces_at(&self, x: f64, y: f64) -> Vec<PieceId> {
        self.pieces
            .iter()
            .filter(|piece| piece.coord_collides(x, y))
            .map(Piece::id)
            .collect()
    }

    pub fn selected(&self) -> &[PieceId] {
        &self.selected
    }

    pub fn only_selected(&self) -> Option<PieceId> {
        match self.selected.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn toggle_selection(&mut self, id: PieceId) -> Result<SelectionChange, BoardError> {
        let index = self.index_of(id)?;
        let piece = &mut self.pieces[index];
        if piece.selected {
            piece.selected = false;
            piece.cancel_preview();
            self.selected.retain(|selected| *selected != id);
            return Ok(SelectionChange {
                selected: false,
                evicted: None,
            });
        }

        piece.selected = true;
        self.selected.push(id);
        let mut evicted = None;
        if !self.config.allow_multi_select && self.selected.len() == 2 {
            let oldest = self.selected.remove(0);
            let oldest_index = self.index_of(oldest)?;
            self.pieces[oldest_index].selected = false;
            self.pieces[oldest_index].cancel_preview();
            self.pieces[index].cancel_preview();
            evicted = Some(oldest);
        }
        Ok(SelectionChange {
            selected: true,
            evicted,
        })
    }

    pub fn deselect_all(&mut self) {
        for piece in &mut self.pieces {
            if piece.selected {
                piece.selected = false;
                piece.cancel_preview();
            }
        }
        self.selected.clear();
    }

    pub fn set_preview(&mut self, id: PieceId, angle: f64) -> Result<(), BoardError> {
        let index = self.index_of(id)?;
        self.pieces[index].set_preview_angle(angle);
        Ok(())
    }

    pub fn preview_selected(&mut self, angle: f64) {
        for piece in self.pieces.iter_mut().filter(|piece| piece.selected) {
            piece.set_preview_angle(angle);
        }
    }

    /// Commits the pending rotation of every selected piece and clears the
    /// selection. Nothing changes unless every selected piece is previewing.
    pub fn confirm_selected(&mut self) -> Result<usize, BoardError> {
        if self
            .pieces
            .iter()
            .any(|piece| piece.selected && !piece.is_previewing())
        {
            return Err(PieceError::NoPreview.into());
        }
        let mut confirmed = 0;
        for piece in self.pieces.iter_mut().filter(|piece| piece.selected) {
            piece.confirm_preview()?;
            confirmed += 1;
        }
        self.deselect_all();
        Ok(confirmed)
    }

    pub fn cancel_selected(&mut self) {
        self.deselect_all();
    }

    fn require_only_selected(&self, id: PieceId) -> Result<usize, BoardError> {
        let index = self.index_of(id)?;
        match self.selected.as_slice() {
            [only] if *only == id => Ok(index),
            [_] => Err(BoardError::NotSelected(id)),
            other => Err(BoardError::SelectionCount(other.len())),
        }
    }

    /// Whether the sole selected piece may go to `(x, y)`.
    ///
    /// Friendly pieces overlapping the destination forbid the move. Jumping
    /// pieces ignore everything else; other pieces are stopped by any piece
    /// whose centre sits ahead of the mover, no further than one radius past
    /// the destination, and closer than two radii to the path. Pieces
    /// overlapping the destination are captured rather than blocking.
    pub fn can_move(&self, id: PieceId, x: f64, y: f64) -> Result<bool, BoardError> {
        let mover = &self.pieces[self.require_only_selected(id)?];
        let overlapping: Vec<&Piece> = self
            .pieces
            .iter()
            .filter(|piece| piece.id() != id && piece.piece_collides(x, y))
            .collect();
        if overlapping.iter().any(|piece| piece.side() == mover.side()) {
            return Ok(false);
        }
        if mover.can_jump() {
            return Ok(true);
        }

        let start = mover.position();
        let end = Point::new(x, y);
        let distance = start.distance(end);
        let radius = mover.radius();
        let blocked = self
            .pieces
            .iter()
            .filter(|piece| piece.id() != id)
            .filter(|piece| !overlapping.iter().any(|hit| hit.id() == piece.id()))
            .any(|piece| {
                let center = piece.position();
                match (
                    scalar_projection(start, center, end),
                    line_distance(start, end, center),
                ) {
                    (Some(along), Some(across)) => {
                        0.0 < along && along < distance + radius && across < 2.0 * radius
                    }
                    _ => false,
                }
            });
        Ok(!blocked)
    }

    /// Plays a move without checking legality: relocates the sole selected
    /// piece, captures everything it lands on, clears the selection, hides
    /// the selector and promotes if due.
    pub fn move_piece(
        &mut self,
        id: PieceId,
        x: f64,
        y: f64,
        selector: &mut dyn RotationSelector,
    ) -> Result<MoveOutcome, BoardError> {
        let index = self.require_only_selected(id)?;
        self.pieces[index].move_to(x, y);

        let mut captured = Vec::new();
        self.pieces.retain(|piece| {
            let hit = piece.id() != id && piece.piece_collides(x, y);
            if hit {
                captured.push(piece.record());
            }
            !hit
        });
        if !captured.is_empty() {
            log::debug!("piece {} captured {} piece(s)", id.index(), captured.len());
        }

        self.deselect_all();
        selector.hide();

        let index = self.index_of(id)?;
        let mut piece_id = id;
        let promoted = self.pieces[index].should_promote();
        if promoted {
            let pawn = self.pieces.remove(index);
            let record = pawn.record();
            piece_id = self.add(PieceRecord {
                piece_type: PieceType::Queen,
                ..record
            });
            log::debug!("pawn {} promoted to queen {}", id.index(), piece_id.index());
        }

        Ok(MoveOutcome {
            piece: piece_id,
            captured,
            promoted,
        })
    }

    pub fn snapshot(&self) -> Turn {
        self.pieces.iter().map(Piece::record).collect()
    }

    /// Rebuilds every live piece from `turn` with fresh ids. Clears the selection.
    pub fn restore(&mut self, turn: &Turn) {
        self.pieces.clear();
        self.selected.clear();
        for record in &turn.pieces {
            self.add(*record);
        }
    }

    /// A piece is flagged selected exactly when its id is in the selection list.
    pub fn selection_is_consistent(&self) -> bool {
        let flagged = self.pieces.iter().filter(|piece| piece.selected).count();
        flagged == self.selected.len()
            && self.selected.iter().all(|id| {
                self.get(*id).is_some_and(Piece::is_selected)
            })
    }
}
