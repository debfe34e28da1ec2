//! Shared helpers: build catalogs once and replay records through shakmaty.

#![allow(dead_code)]

use std::fmt::Display;
use std::path::PathBuf;
use std::sync::LazyLock;

use catalog_generator::catalog::{build_catalog, Catalog, NotationStyle};
use catalog_generator::overrides::OverrideTable;
use catalog_generator::stats::MoveRecord;
use notation_core::{MoveNotation, TerminalStatus};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Position, PositionError};

pub static OVERRIDES: LazyLock<OverrideTable> = LazyLock::new(|| {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/manual-moves.txt");
    OverrideTable::from_path(path).expect("override file loads")
});

pub static SAN_CATALOG: LazyLock<Catalog> =
    LazyLock::new(|| build_catalog(NotationStyle::San, &OVERRIDES, 4));

pub static LAN_CATALOG: LazyLock<Catalog> =
    LazyLock::new(|| build_catalog(NotationStyle::Lan, &OVERRIDES, 4));

/// Parse a position string into a shakmaty position.
///
/// Box-in positions may carry more rooks than a real game allows, so the
/// material check is relaxed.
pub fn position(text: &str) -> Chess {
    let fen: Fen = text
        .parse()
        .unwrap_or_else(|e| panic!("invalid position string {text}: {e}"));
    fen.into_position::<Chess>(CastlingMode::Standard)
        .or_else(PositionError::ignore_too_much_material)
        .unwrap_or_else(|e| panic!("illegal position {text}: {e}"))
}

/// Play a SAN record and return the SAN shakmaty writes for the same move.
pub fn replay_san(record: &MoveRecord) -> Result<String, String> {
    let pos = position(&record.position);
    let san: SanPlus = record
        .notation
        .parse()
        .map_err(|e| format!("{}: unparsable SAN: {e}", record.notation))?;
    let m = san.san.to_move(&pos).map_err(|e| describe(record, e))?;
    Ok(SanPlus::from_move(pos, m).to_string())
}

/// Play a LAN record and check origin, capture flag and terminal status.
pub fn replay_lan(record: &MoveRecord) -> Result<(), String> {
    let pos = position(&record.position);
    let notation: MoveNotation = record.notation.parse().map_err(|e| describe(record, e))?;

    let promotion = notation
        .promotion
        .map(|p| p.symbol().to_ascii_lowercase().to_string())
        .unwrap_or_default();
    let uci: UciMove = format!("{}{}{}", notation.qualifier, notation.to, promotion)
        .parse()
        .map_err(|e| describe(record, e))?;
    let m = uci.to_move(&pos).map_err(|e| describe(record, e))?;

    if m.is_capture() != notation.capture {
        return Err(describe(record, "capture flag mismatch"));
    }

    let mut after = pos;
    after.play_unchecked(m);
    let status = if after.is_checkmate() {
        TerminalStatus::Checkmate
    } else if after.is_check() {
        TerminalStatus::Check
    } else {
        TerminalStatus::Quiet
    };
    if status != notation.status {
        return Err(describe(record, format!("got {status:?}")));
    }
    Ok(())
}

fn describe(record: &MoveRecord, error: impl Display) -> String {
    format!("{} in {}: {error}", record.notation, record.position)
}

/// Number of pieces of `symbol` (FEN letter) in a position string.
pub fn count_pieces(fen: &str, symbol: char) -> usize {
    fen.split(' ')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|&c| c == symbol)
        .count()
}
