use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::PIECE_NAME_TO_TYPE;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Black = 1,
    White = 2,
}

impl Side {
    pub const fn to_code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Black),
            2 => Some(Self::White),
            _ => None,
        }
    }

    /// Suffix used by the asset naming scheme (`piece_pawnB1`).
    pub const fn asset_code(self) -> char {
        match self {
            Self::Black => 'B',
            Self::White => 'W',
        }
    }

    /// Facing of this side's pieces in the standard setup.
    pub const fn home_angle(self) -> f64 {
        match self {
            Self::Black => PI,
            Self::White => 0.0,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn = 0,
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Rook,
        Self::Knight,
        Self::Bishop,
        Self::Queen,
        Self::King,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PIECE_NAME_TO_TYPE
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, piece_type)| *piece_type)
    }

    /// Jumping pieces reach their template points regardless of what lies in between.
    pub const fn can_jump(self) -> bool {
        matches!(self, Self::Pawn | Self::Knight | Self::King)
    }

    /// Key an asset loader resolves to this piece's sprite, e.g. `piece_knightW1`.
    pub fn asset_name(self, side: Side, skin: Skin) -> String {
        format!(
            "piece_{}{}{}",
            self.name(),
            side.asset_code(),
            skin.suffix()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u64);

impl PieceId {
    pub const fn index(self) -> u64 {
        self.0
    }
}

/// Flat, value-semantics description of one piece. History snapshots and
/// save files are built from these, never from live pieces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceRecord {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub side: Side,
    pub piece_type: PieceType,
}

impl PieceRecord {
    pub const fn new(x: f64, y: f64, angle: f64, side: Side, piece_type: PieceType) -> Self {
        Self {
            x,
            y,
            angle,
            side,
            piece_type,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupMode {
    #[default]
    Standard = 0,
    Chess960 = 1,
}

impl SetupMode {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Standard),
            1 => Some(Self::Chess960),
            _ => None,
        }
    }

    pub const fn to_code(self) -> u8 {
        self as u8
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    Plain = 0,
    #[default]
    Wood = 1,
    Marble = 2,
    Glass = 3,
}

impl Skin {
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Wood => "1",
            Self::Marble => "2",
            Self::Glass => "3",
        }
    }
}
