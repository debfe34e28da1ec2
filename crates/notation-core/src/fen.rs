//! Position strings: FEN piece placement followed by fixed placeholders.
//!
//! Only the board field carries information. Side to move is `w`, or `b` when
//! colors were swapped on output; castling, en passant and clocks are always
//! `- - 0 1`.

use crate::board::Board;
use crate::error::NotationError;
use crate::piece::{Color, Piece};
use crate::square::Square;

/// A board of pieces.
pub type Position = Board<Option<Piece>>;

/// Reflections applied while serializing a position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Orientation {
    pub flip_files: bool,
    pub flip_ranks: bool,
    /// Swap piece colors and hand the move to black.
    pub swap_colors: bool,
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation {
        flip_files: false,
        flip_ranks: false,
        swap_colors: false,
    };

    /// Rank reflection with color swap: turns a white pawn move into the black one.
    pub const BLACK_PAWN: Orientation = Orientation {
        flip_files: false,
        flip_ranks: true,
        swap_colors: true,
    };
}

/// Serialize `position` as a position string.
pub fn to_fen(position: &Position, orientation: Orientation) -> String {
    let mut ranks = Vec::with_capacity(8);

    for rank in (0..8u8).rev() {
        let mut empty = 0;
        let mut row = String::new();

        for file in 0..8u8 {
            let source = Square::at(file, rank)
                .reflected(orientation.flip_files, orientation.flip_ranks);

            match position[source] {
                None => empty += 1,
                Some(piece) => {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    let piece = if orientation.swap_colors {
                        piece.with_swapped_color()
                    } else {
                        piece
                    };
                    row.push(piece.symbol());
                }
            }
        }

        if empty > 0 {
            row.push_str(&empty.to_string());
        }
        ranks.push(row);
    }

    let side = if orientation.swap_colors {
        Color::Black
    } else {
        Color::White
    };
    format!("{} {} - - 0 1", ranks.join("/"), side.fen_char())
}

/// Parse the piece-placement field of a position string.
///
/// Anything after the first whitespace is ignored. Ranks must add up to
/// exactly eight squares.
pub fn parse_board(fen: &str) -> Result<Position, NotationError> {
    let placement = fen
        .split_whitespace()
        .next()
        .ok_or_else(|| NotationError::position(fen, "empty position string"))?;

    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(NotationError::position(fen, "expected 8 ranks"));
    }

    let mut position = Position::default();

    // First row is rank 8
    for (row_idx, row) in rows.iter().enumerate() {
        let rank = 7 - row_idx as u8;
        let mut file = 0u8;

        for c in row.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(NotationError::position(fen, "invalid empty-square count"));
                }
                file += run as u8;
            } else {
                let piece = Piece::from_symbol(c)
                    .ok_or_else(|| NotationError::position(fen, "invalid piece letter"))?;
                if file >= 8 {
                    return Err(NotationError::position(fen, "rank too long"));
                }
                position[Square::at(file, rank)] = Some(piece);
                file += 1;
            }

            if file > 8 {
                return Err(NotationError::position(fen, "rank too long"));
            }
        }

        if file != 8 {
            return Err(NotationError::position(fen, "rank too short"));
        }
    }

    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for fen in [
            "8/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/3R4/8/8/R3K3 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
            "7k/5N2/6K1/8/8/8/8/8 w - - 0 1",
        ] {
            let board = parse_board(fen).unwrap();
            assert_eq!(to_fen(&board, Orientation::IDENTITY), fen);
        }
    }

    #[test]
    fn test_parse_places_pieces() {
        let board = parse_board("4k3/8/8/8/3R4/8/8/R3K3 w - - 0 1").unwrap();
        for (square, symbol) in [("d4", 'R'), ("e8", 'k'), ("a1", 'R')] {
            let square: Square = square.parse().unwrap();
            assert_eq!(board[square], Piece::from_symbol(symbol), "{square}");
        }
        assert_eq!(board.count(|p| p.is_some()), 4);
    }

    #[test]
    fn test_reflections() {
        let board = parse_board("8/8/8/8/8/8/1P6/K7 w - - 0 1").unwrap();
        let files = Orientation {
            flip_files: true,
            ..Orientation::IDENTITY
        };
        assert_eq!(to_fen(&board, files), "8/8/8/8/8/8/6P1/7K w - - 0 1");
        assert_eq!(
            to_fen(&board, Orientation::BLACK_PAWN),
            "k7/1p6/8/8/8/8/8/8 b - - 0 1"
        );
    }

    #[test]
    fn test_malformed_positions() {
        assert!(parse_board("").is_err());
        assert!(parse_board("8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_board("9/8/8/8/8/8/8/8").is_err());
        assert!(parse_board("7/8/8/8/8/8/8/8").is_err());
        assert!(parse_board("4k4/8/8/8/8/8/8/8").is_err());
        assert!(parse_board("4x3/8/8/8/8/8/8/8").is_err());
        assert!(parse_board("0kkkkkkkk/8/8/8/8/8/8/8").is_err());
    }
}
