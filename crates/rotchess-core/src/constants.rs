use std::f64::consts::SQRT_2;

use crate::types::PieceType;

pub const CELL_SIZE: f64 = 50.0;
pub const BOARD_CELLS: usize = 8;
pub const BOARD_SIZE: f64 = CELL_SIZE * BOARD_CELLS as f64;

/// Diagonal step between adjacent cell centres.
pub const DIAGONAL_STEP: f64 = CELL_SIZE * SQRT_2;

pub const DEFAULT_COLLISION_RADIUS: f64 = 20.0;
/// Largest hit circle that keeps neighbouring cell centres from overlapping.
pub const MAX_COLLISION_RADIUS: f64 = CELL_SIZE / 2.0;

pub const DIAL_CENTER: (f64, f64) = (500.0, 200.0);
pub const DIAL_RADIUS: f64 = 80.0;

pub const SAVE_VERSION: &str = "1.0.0";
pub const SUPPORTED_SAVE_MAJOR: u64 = 1;

pub const BACK_RANK: [PieceType; BOARD_CELLS] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

pub const PIECE_NAME_TO_TYPE: [(&str, PieceType); 6] = [
    ("pawn", PieceType::Pawn),
    ("rook", PieceType::Rook),
    ("knight", PieceType::Knight),
    ("bishop", PieceType::Bishop),
    ("queen", PieceType::Queen),
    ("king", PieceType::King),
];

/// Centre coordinate of the cell at `index` (0-based) along either axis.
pub const fn cell_center(index: usize) -> f64 {
    index as f64 * CELL_SIZE + CELL_SIZE / 2.0
}
