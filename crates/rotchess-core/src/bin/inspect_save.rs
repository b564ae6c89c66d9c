use std::fs::File;
use std::io;
use std::process::ExitCode;

use rotchess_core::save::{decode, SaveError};
use rotchess_core::{PieceType, Side, Turn};

fn count(turn: &Turn, side: Side, piece_type: PieceType) -> usize {
    turn.pieces
        .iter()
        .filter(|piece| piece.side == side && piece.piece_type == piece_type)
        .count()
}

fn summary(turn: &Turn, side: Side) -> String {
    PieceType::ALL
        .into_iter()
        .map(|piece_type| count(turn, side, piece_type))
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn load(path: Option<&str>) -> Result<(String, Vec<Turn>), SaveError> {
    let text = match path {
        Some("-") | None => io::read_to_string(io::stdin()).map_err(SaveError::Io)?,
        Some(path) => io::read_to_string(File::open(path).map_err(SaveError::Io)?)
            .map_err(SaveError::Io)?,
    };
    let file = decode(&text)?;
    let version = file.save_version.clone();
    Ok((version, file.into_turns()?))
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let (version, turns) = match load(args.get(1).map(String::as_str)) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("save version {version}, {} turns", turns.len());
    println!("counts are pawn/rook/knight/bishop/queen/king");
    for (index, turn) in turns.iter().enumerate() {
        println!(
            "turn {index:>4}: {:>2} pieces  white {}  black {}",
            turn.len(),
            summary(turn, Side::White),
            summary(turn, Side::Black),
        );
    }
    ExitCode::SUCCESS
}
