use crate::constants::{BOARD_SIZE, CELL_SIZE};
use crate::geometry::{Bounds, Point};
use crate::template::{capture_templates, move_templates, MovementTemplate};
use crate::types::{PieceId, PieceRecord, PieceType, Side};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PieceError {
    #[error("piece has no pending rotation to confirm")]
    NoPreview,
}

/// Points a piece can reach from one position and facing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reach {
    pub captures: Vec<Point>,
    pub moves: Vec<Point>,
}

impl Reach {
    pub fn compute(piece_type: PieceType, origin: Point, angle: f64, radius: f64) -> Self {
        let bounds = Bounds::board(radius);
        let collect = |templates: &[MovementTemplate]| {
            templates
                .iter()
                .flat_map(|template| template.points_from(origin, angle, bounds))
                .collect::<Vec<_>>()
        };
        Self {
            captures: collect(capture_templates(piece_type)),
            moves: collect(move_templates(piece_type)),
        }
    }

    /// Capture points first, then move points.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.captures.iter().chain(self.moves.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.captures.len() + self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty() && self.moves.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Facing {
    Committed(f64),
    /// A rotation shown to the player but not yet played.
    Previewing {
        committed: f64,
        pending: f64,
        reach: Reach,
    },
}

impl Facing {
    pub const fn committed(&self) -> f64 {
        match self {
            Self::Committed(angle) => *angle,
            Self::Previewing { committed, .. } => *committed,
        }
    }

    pub const fn pending(&self) -> Option<f64> {
        match self {
            Self::Committed(_) => None,
            Self::Previewing { pending, .. } => Some(*pending),
        }
    }

    pub const fn is_previewing(&self) -> bool {
        matches!(self, Self::Previewing { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    position: Point,
    facing: Facing,
    side: Side,
    piece_type: PieceType,
    reach: Reach,
    radius: f64,
    pub(crate) selected: bool,
}

impl Piece {
    pub fn new(id: PieceId, record: PieceRecord, radius: f64) -> Self {
        let position = Point::new(record.x, record.y);
        Self {
            id,
            position,
            facing: Facing::Committed(record.angle),
            side: record.side,
            piece_type: record.piece_type,
            reach: Reach::compute(record.piece_type, position, record.angle, radius),
            radius,
            selected: false,
        }
    }

    pub const fn id(&self) -> PieceId {
        self.id
    }

    pub const fn position(&self) -> Point {
        self.position
    }

    pub const fn x(&self) -> f64 {
        self.position.x
    }

    pub const fn y(&self) -> f64 {
        self.position.y
    }

    pub const fn side(&self) -> Side {
        self.side
    }

    pub const fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    pub const fn can_jump(&self) -> bool {
        self.piece_type.can_jump()
    }

    pub const fn radius(&self) -> f64 {
        self.radius
    }

    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    pub const fn facing(&self) -> &Facing {
        &self.facing
    }

    pub const fn angle(&self) -> f64 {
        self.facing.committed()
    }

    pub const fn preview_angle(&self) -> Option<f64> {
        self.facing.pending()
    }

    pub const fn is_previewing(&self) -> bool {
        self.facing.is_previewing()
    }

    /// Reach for the committed angle, ignoring any preview.
    pub const fn committed_reach(&self) -> &Reach {
        &self.reach
    }

    /// Reach players see: the preview while one is pending, the committed reach otherwise.
    pub fn reach(&self) -> &Reach {
        match &self.facing {
            Facing::Committed(_) => &self.reach,
            Facing::Previewing { reach, .. } => reach,
        }
    }

    pub fn movable_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.reach().iter()
    }

    /// Relocates without any legality check.
    pub fn move_to(&mut self, x: f64, y: f64) {
        log::debug!(
            "{} {:?} {} moved ({:.2}, {:.2}) -> ({x:.2}, {y:.2})",
            self.piece_type.name(),
            self.side,
            self.id.index(),
            self.position.x,
            self.position.y,
        );
        self.position = Point::new(x, y);
        self.reach = Reach::compute(self.piece_type, self.position, self.angle(), self.radius);
        if let Facing::Previewing { pending, reach, .. } = &mut self.facing {
            *reach = Reach::compute(self.piece_type, self.position, *pending, self.radius);
        }
    }

    pub fn set_preview_angle(&mut self, angle: f64) {
        let reach = Reach::compute(self.piece_type, self.position, angle, self.radius);
        self.facing = Facing::Previewing {
            committed: self.angle(),
            pending: angle,
            reach,
        };
    }

    pub fn confirm_preview(&mut self) -> Result<(), PieceError> {
        let current = self.angle();
        let facing = std::mem::replace(&mut self.facing, Facing::Committed(current));
        match facing {
            Facing::Previewing {
                committed,
                pending,
                reach,
            } => {
                log::debug!(
                    "{} {:?} {} rotated {committed:.4} -> {pending:.4}",
                    self.piece_type.name(),
                    self.side,
                    self.id.index(),
                );
                self.facing = Facing::Committed(pending);
                self.reach = reach;
                Ok(())
            }
            committed @ Facing::Committed(_) => {
                self.facing = committed;
                Err(PieceError::NoPreview)
            }
        }
    }

    pub fn cancel_preview(&mut self) {
        self.facing = Facing::Committed(self.angle());
    }

    pub fn should_promote(&self) -> bool {
        if self.piece_type != PieceType::Pawn {
            return false;
        }
        match self.side {
            Side::White => self.position.y - self.radius < CELL_SIZE,
            Side::Black => self.position.y + self.radius > BOARD_SIZE - CELL_SIZE,
        }
    }

    /// Whether `(x, y)` lies on this piece's hit circle.
    pub fn coord_collides(&self, x: f64, y: f64) -> bool {
        self.position.distance_sq(Point::new(x, y)) < self.radius * self.radius
    }

    /// Whether a piece centred at `(x, y)` would overlap this one.
    pub fn piece_collides(&self, x: f64, y: f64) -> bool {
        let reach = 2.0 * self.radius;
        self.position.distance_sq(Point::new(x, y)) < reach * reach
    }

    pub const fn record(&self) -> PieceRecord {
        PieceRecord::new(
            self.position.x,
            self.position.y,
            self.facing.committed(),
            self.side,
            self.piece_type,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn piece(piece_type: PieceType, side: Side, x: f64, y: f64, angle: f64) -> Piece {
        Piece::new(PieceId(0), PieceRecord::new(x, y, angle, side, piece_type), 20.0)
    }

    #[test]
    fn white_pawn_reaches_forward_and_diagonally() {
        let pawn = piece(PieceType::Pawn, Side::White, 225.0, 325.0, 0.0);
        let reach = pawn.reach();
        assert_eq!(reach.captures.len(), 2);
        assert_eq!(reach.moves.len(), 2);
        assert!((reach.moves[0].y - 275.0).abs() < 1e-9);
        assert!((reach.moves[1].y - 225.0).abs() < 1e-9);
        assert!((reach.captures[0].x - 175.0).abs() < 1e-9);
        assert!((reach.captures[1].x - 275.0).abs() < 1e-9);
    }

    #[test]
    fn black_pawn_advances_downward() {
        let pawn = piece(PieceType::Pawn, Side::Black, 225.0, 75.0, PI);
        let first = pawn.reach().moves[0];
        assert!((first.x - 225.0).abs() < 1e-9);
        assert!((first.y - 125.0).abs() < 1e-9);
    }

    #[test]
    fn preview_cancel_restores_committed_reach() {
        let mut rook = piece(PieceType::Rook, Side::White, 25.0, 375.0, 0.0);
        let before = rook.reach().clone();
        rook.set_preview_angle(FRAC_PI_2 / 2.0);
        assert!(rook.is_previewing());
        assert_ne!(rook.reach(), &before);
        assert_eq!(rook.committed_reach(), &before);
        rook.cancel_preview();
        assert!(!rook.is_previewing());
        assert_eq!(rook.angle(), 0.0);
        assert_eq!(rook.reach(), &before);
    }

    #[test]
    fn preview_confirm_adopts_pending_reach() {
        let mut knight = piece(PieceType::Knight, Side::Black, 200.0, 200.0, 0.0);
        knight.set_preview_angle(0.3);
        let pending = knight.reach().clone();
        knight.confirm_preview().unwrap();
        assert_eq!(knight.angle(), 0.3);
        assert_eq!(knight.preview_angle(), None);
        assert_eq!(knight.reach(), &pending);
        assert_eq!(knight.committed_reach(), &pending);
    }

    #[test]
    fn confirm_without_preview_fails() {
        let mut king = piece(PieceType::King, Side::White, 200.0, 200.0, 0.0);
        assert_eq!(king.confirm_preview(), Err(PieceError::NoPreview));
        assert_eq!(king.angle(), 0.0);
    }

    #[test]
    fn move_while_previewing_refreshes_both_reaches() {
        let mut bishop = piece(PieceType::Bishop, Side::White, 125.0, 375.0, 0.0);
        bishop.set_preview_angle(0.5);
        bishop.move_to(200.0, 200.0);
        let expected_committed = Reach::compute(PieceType::Bishop, Point::new(200.0, 200.0), 0.0, 20.0);
        let expected_pending = Reach::compute(PieceType::Bishop, Point::new(200.0, 200.0), 0.5, 20.0);
        assert_eq!(bishop.committed_reach(), &expected_committed);
        assert_eq!(bishop.reach(), &expected_pending);
    }

    #[test]
    fn pawns_promote_near_far_edge() {
        assert!(piece(PieceType::Pawn, Side::White, 100.0, 69.0, 0.0).should_promote());
        assert!(!piece(PieceType::Pawn, Side::White, 100.0, 70.0, 0.0).should_promote());
        assert!(piece(PieceType::Pawn, Side::Black, 100.0, 331.0, PI).should_promote());
        assert!(!piece(PieceType::Pawn, Side::Black, 100.0, 330.0, PI).should_promote());
        assert!(!piece(PieceType::Rook, Side::White, 100.0, 25.0, 0.0).should_promote());
        assert!(!piece(PieceType::Queen, Side::Black, 100.0, 375.0, PI).should_promote());
    }

    #[test]
    fn collision_tests_use_strict_bounds() {
        let king = piece(PieceType::King, Side::White, 100.0, 100.0, 0.0);
        assert!(king.coord_collides(119.0, 100.0));
        assert!(!king.coord_collides(120.0, 100.0));
        assert!(king.piece_collides(139.9, 100.0));
        assert!(!king.piece_collides(140.0, 100.0));
    }

    #[test]
    fn record_ignores_pending_preview() {
        let mut queen = piece(PieceType::Queen, Side::Black, 175.0, 25.0, PI);
        queen.set_preview_angle(1.0);
        let record = queen.record();
        assert_eq!(record, PieceRecord::new(175.0, 25.0, PI, Side::Black, PieceType::Queen));
    }
}
