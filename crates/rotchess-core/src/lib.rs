pub mod board;
pub mod config;
pub mod constants;
pub mod dial;
pub mod game;
pub mod geometry;
pub mod history;
pub mod piece;
pub mod save;
pub mod template;
pub mod types;

pub use board::{Board, BoardError, MoveOutcome, SelectionChange};
pub use config::{ConfigError, GameConfig};
pub use dial::{NoopSelector, RotationDial, RotationSelector};
pub use game::{ClickOutcome, Game, GameError};
pub use geometry::Point;
pub use history::{HistoryError, Turn, TurnHistory};
pub use piece::{Facing, Piece, PieceError, Reach};
pub use save::SaveError;
pub use types::{PieceId, PieceRecord, PieceType, SetupMode, Side, Skin};
