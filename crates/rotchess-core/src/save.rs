//! Save files: the whole turn history as JSON, zlib-compressed and base64
//! encoded so it survives a clipboard or a text field.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{SAVE_VERSION, SUPPORTED_SAVE_MAJOR};
use crate::history::{Turn, TurnHistory};
use crate::types::{PieceRecord, PieceType, Side};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("save could not be decompressed: {0}")]
    Decompress(std::io::Error),
    #[error("save is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown side tag {0}")]
    UnknownSide(u8),
    #[error("unknown piece name {0:?}")]
    UnknownPiece(String),
    #[error("non-finite value in turn {turn}")]
    NonFinite { turn: usize },
    #[error("unsupported save version {0:?}")]
    UnsupportedVersion(String),
    #[error("save holds no turns")]
    Empty,
    #[error(transparent)]
    Io(std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub save_version: String,
    pub save: Vec<Vec<SavedPiece>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPiece {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub side: u8,
    pub piece_name: String,
}

impl From<&PieceRecord> for SavedPiece {
    fn from(record: &PieceRecord) -> Self {
        Self {
            x: record.x,
            y: record.y,
            angle: record.angle,
            side: record.side.to_code(),
            piece_name: record.piece_type.name().to_string(),
        }
    }
}

impl SavedPiece {
    fn to_record(&self, turn: usize) -> Result<PieceRecord, SaveError> {
        let side = Side::from_code(self.side).ok_or(SaveError::UnknownSide(self.side))?;
        let piece_type = PieceType::from_name(&self.piece_name)
            .ok_or_else(|| SaveError::UnknownPiece(self.piece_name.clone()))?;
        if !(self.x.is_finite() && self.y.is_finite() && self.angle.is_finite()) {
            return Err(SaveError::NonFinite { turn });
        }
        Ok(PieceRecord::new(self.x, self.y, self.angle, side, piece_type))
    }
}

impl SaveFile {
    pub fn from_turns(turns: &[Turn]) -> Self {
        Self {
            save_version: SAVE_VERSION.to_string(),
            save: turns
                .iter()
                .map(|turn| turn.pieces.iter().map(SavedPiece::from).collect())
                .collect(),
        }
    }

    pub fn into_turns(self) -> Result<Vec<Turn>, SaveError> {
        check_version(&self.save_version)?;
        if self.save.is_empty() {
            return Err(SaveError::Empty);
        }
        self.save
            .iter()
            .enumerate()
            .map(|(index, pieces)| {
                pieces
                    .iter()
                    .map(|piece| piece.to_record(index))
                    .collect::<Result<Turn, _>>()
            })
            .collect()
    }
}

fn check_version(version: &str) -> Result<(), SaveError> {
    let major = version
        .split('.')
        .next()
        .and_then(|major| major.trim().parse::<u64>().ok());
    match major {
        Some(SUPPORTED_SAVE_MAJOR) => Ok(()),
        _ => Err(SaveError::UnsupportedVersion(version.to_string())),
    }
}

pub fn encode(file: &SaveFile) -> Result<String, SaveError> {
    let json = serde_json::to_vec(file)?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json).map_err(SaveError::Io)?;
    let compressed = encoder.finish().map_err(SaveError::Io)?;
    Ok(STANDARD.encode(compressed))
}

pub fn decode(text: &str) -> Result<SaveFile, SaveError> {
    let compact: String = text.split_whitespace().collect();
    let compressed = STANDARD.decode(compact.as_bytes())?;
    let mut json = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_end(&mut json)
        .map_err(SaveError::Decompress)?;
    Ok(serde_json::from_slice(&json)?)
}

pub fn export(history: &TurnHistory) -> Result<String, SaveError> {
    encode(&SaveFile::from_turns(history.turns()))
}

/// Decodes a save produced by [`export`]. Whitespace anywhere in `text` is ignored.
pub fn import(text: &str) -> Result<Vec<Turn>, SaveError> {
    let result = decode(text).and_then(SaveFile::into_turns);
    if let Err(err) = &result {
        log::warn!("rejected save: {err}");
    }
    result
}

pub fn export_to_writer<W: Write>(history: &TurnHistory, mut writer: W) -> Result<(), SaveError> {
    let text = export(history)?;
    writer.write_all(text.as_bytes()).map_err(SaveError::Io)?;
    writer.flush().map_err(SaveError::Io)
}

pub fn import_from_reader<R: Read>(mut reader: R) -> Result<Vec<Turn>, SaveError> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(SaveError::Io)?;
    import(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_major_must_match() {
        assert!(check_version("1.0.0").is_ok());
        assert!(check_version("1.4.2").is_ok());
        assert!(matches!(
            check_version("2.0.0"),
            Err(SaveError::UnsupportedVersion(_))
        ));
        assert!(check_version("").is_err());
        assert!(check_version("one").is_err());
    }

    #[test]
    fn decode_ignores_embedded_whitespace() {
        let file = SaveFile {
            save_version: SAVE_VERSION.to_string(),
            save: vec![vec![]],
        };
        let text = encode(&file).unwrap();
        let (head, tail) = text.split_at(text.len() / 2);
        let wrapped = format!("  {head}\n{tail}\t\n");
        assert_eq!(decode(&wrapped).unwrap(), file);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let json = r#"{"save_version":"1.0.0","instructions":"paste me","save":[[{"x":25,"y":375,"angle":0,"side":2,"piece_name":"rook"}]]}"#;
        let file: SaveFile = serde_json::from_str(json).unwrap();
        let turns = file.into_turns().unwrap();
        assert_eq!(
            turns[0].pieces[0],
            PieceRecord::new(25.0, 375.0, 0.0, Side::White, PieceType::Rook)
        );
    }

    #[test]
    fn bad_tags_are_rejected() {
        let piece = |side: u8, name: &str| SavedPiece {
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            side,
            piece_name: name.to_string(),
        };
        assert!(matches!(piece(3, "pawn").to_record(0), Err(SaveError::UnknownSide(3))));
        assert!(matches!(
            piece(1, "archbishop").to_record(0),
            Err(SaveError::UnknownPiece(name)) if name == "archbishop"
        ));
        let mut infinite = piece(1, "pawn");
        infinite.angle = f64::INFINITY;
        assert!(matches!(infinite.to_record(4), Err(SaveError::NonFinite { turn: 4 })));
    }
}
