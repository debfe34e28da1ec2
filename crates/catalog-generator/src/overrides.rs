//! Hand-written witness positions for moves the synthesizer cannot build.
//!
//! Source format, one entry per line:
//!
//! ```text
//! # comment
//! Rd1d4   4k3/8/8/8/8/8/8/3RK3 w - - 0 1
//! ```
//!
//! Every non-castling entry is expanded into its four file/rank reflections,
//! and quiet piece moves also yield their capturing twin.

use std::collections::HashMap;
use std::path::Path;

use notation_core::{
    is_castle, parse_board, to_fen, MoveNotation, Orientation, Piece, PieceKind, Position,
};
use tracing::{debug, warn};

use crate::error::GeneratorError;

/// Read-only notation -> position string lookup.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<String, String>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and expand the override file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| GeneratorError::io(path, e))?;
        Self::parse(&source)
    }

    /// Parse override source text.
    ///
    /// Malformed notations are skipped; a malformed position string fails the
    /// whole table.
    pub fn parse(source: &str) -> Result<Self, GeneratorError> {
        let mut table = Self::new();

        for (idx, line) in source.lines().enumerate() {
            let line_no = idx + 1;
            if line.starts_with('#') {
                continue;
            }

            let Some((notation, fen)) = split_entry(line) else {
                continue;
            };

            if is_castle(notation) {
                table.entries.insert(notation.to_string(), fen.to_string());
                continue;
            }

            let parsed: MoveNotation = match notation.parse() {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!(line = line_no, error = %e, "Skipping override entry");
                    continue;
                }
            };

            let board = parse_board(fen).map_err(|source| GeneratorError::Override {
                line: line_no,
                source,
            })?;

            table.expand(&parsed, board);
            debug!(line = line_no, notation, "Expanded override entry");
        }

        Ok(table)
    }

    fn expand(&mut self, notation: &MoveNotation, mut board: Position) {
        let pawn = notation.is_pawn_move();

        for (flip_files, flip_ranks) in [(false, false), (false, true), (true, false), (true, true)]
        {
            let orientation = Orientation {
                flip_files,
                flip_ranks,
                swap_colors: flip_ranks && pawn,
            };
            let reflected = notation.reflected(flip_files, flip_ranks);
            self.entries
                .insert(reflected.to_string(), to_fen(&board, orientation));

            if !notation.capture && !pawn {
                let previous = board[notation.to];
                board[notation.to] = Some(Piece::black(PieceKind::Knight));
                self.entries.insert(
                    reflected.with_capture(true).to_string(),
                    to_fen(&board, orientation),
                );
                board[notation.to] = previous;
            }
        }
    }

    pub fn get(&self, notation: &str) -> Option<&str> {
        self.entries.get(notation).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a line at the first run of whitespace. Both halves must be
/// non-empty.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end();
    let (notation, rest) = line.split_once(char::is_whitespace)?;
    let fen = rest.trim_start();
    if notation.is_empty() || fen.is_empty() {
        return None;
    }
    Some((notation, fen))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_entry() {
        assert_eq!(split_entry("Nf3   8/8 w"), Some(("Nf3", "8/8 w")));
        assert_eq!(split_entry("Nf3"), None);
        assert_eq!(split_entry(" Nf3 x"), None);
        assert_eq!(split_entry("Nf3   "), None);
    }

    #[test]
    fn test_tab_separated_entries() {
        assert_eq!(split_entry("Nf3\t8/8 w"), Some(("Nf3", "8/8 w")));
        assert_eq!(split_entry("Nf3 \t 8/8 w"), Some(("Nf3", "8/8 w")));

        let table = OverrideTable::parse("O-O\t4k3/8/8/8/8/8/8/4K2R w K - 0 1\n").unwrap();
        assert_eq!(table.get("O-O"), Some("4k3/8/8/8/8/8/8/4K2R w K - 0 1"));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let table = OverrideTable::parse("# header\n\n#Qa1 8/8/8/8/8/8/8/8 w - - 0 1\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_castling_kept_verbatim() {
        let table = OverrideTable::parse("O-O-O#  2kr4/8/8/8/8/8/8/R3K3 w Q - 0 1\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("O-O-O#"), Some("2kr4/8/8/8/8/8/8/R3K3 w Q - 0 1"));
    }

    #[test]
    fn test_piece_entry_expands_to_eight() {
        let table = OverrideTable::parse("Rb1b3+ 8/8/8/8/k7/8/8/1R5K w - - 0 1\n").unwrap();
        assert_eq!(table.len(), 8);
        assert_eq!(table.get("Rb1b3+"), Some("8/8/8/8/k7/8/8/1R5K w - - 0 1"));
        assert_eq!(table.get("Rg1g3+"), Some("8/8/8/8/7k/8/8/K5R1 w - - 0 1"));
        assert_eq!(table.get("Rb8b6+"), Some("1R5K/8/8/k7/8/8/8/8 w - - 0 1"));
        assert_eq!(
            table.get("Rg8xg6+"),
            Some("K5R1/8/6n1/7k/8/8/8/8 w - - 0 1")
        );
        assert_eq!(
            table.get("Rb1xb3+"),
            Some("8/8/8/8/k7/1n6/8/1R5K w - - 0 1")
        );
    }

    #[test]
    fn test_pawn_entry_swaps_colors_on_rank_flip() {
        let table = OverrideTable::parse("exd5 8/8/8/3n4/4P3/8/8/K6k w - - 0 1\n").unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get("dxe5"), Some("8/8/8/4n3/3P4/8/8/k6K w - - 0 1"));
        assert_eq!(table.get("exd4"), Some("k6K/8/8/4p3/3N4/8/8/8 b - - 0 1"));
    }

    #[test]
    fn test_bad_notation_is_skipped_bad_position_fails() {
        let table = OverrideTable::parse("Zz9 8/8/8/8/8/8/8/8 w - - 0 1\n").unwrap();
        assert!(table.is_empty());

        let err = OverrideTable::parse("Nf3 8/8/8 w - - 0 1\n").unwrap_err();
        assert!(matches!(err, GeneratorError::Override { line: 1, .. }));
    }
}
