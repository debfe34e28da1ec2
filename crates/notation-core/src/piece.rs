//! Piece kinds, colors and their movement geometry.

use serde::Serialize;

use crate::square::{
    Offset, BISHOP_DIRECTIONS, KING_JUMPS, KNIGHT_JUMPS, PAWN_CAPTURES, QUEEN_DIRECTIONS,
    ROOK_DIRECTIONS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// How a piece reaches its target squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Lands directly on `square + offset`; nothing in between matters.
    Jumps(&'static [Offset]),
    /// Walks each direction until the edge or the first occupied square.
    Slides(&'static [Offset]),
}

impl PieceKind {
    /// Promotion options, in catalog order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::Knight,
    ];

    /// Uppercase letter used in notation and for white pieces in position strings.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Case-insensitive inverse of [`PieceKind::symbol`].
    pub fn from_symbol(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Attack geometry of a white piece of this kind.
    pub fn movement(self) -> Movement {
        match self {
            PieceKind::Pawn => Movement::Jumps(&PAWN_CAPTURES),
            PieceKind::Knight => Movement::Jumps(&KNIGHT_JUMPS),
            PieceKind::King => Movement::Jumps(&KING_JUMPS),
            PieceKind::Bishop => Movement::Slides(&BISHOP_DIRECTIONS),
            PieceKind::Rook => Movement::Slides(&ROOK_DIRECTIONS),
            PieceKind::Queen => Movement::Slides(&QUEEN_DIRECTIONS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Side-to-move field of a position string.
    pub fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn white(kind: PieceKind) -> Piece {
        Piece {
            kind,
            color: Color::White,
        }
    }

    pub fn black(kind: PieceKind) -> Piece {
        Piece {
            kind,
            color: Color::Black,
        }
    }

    pub fn is_white(self) -> bool {
        self.color == Color::White
    }

    /// Position-string letter: uppercase for white, lowercase for black.
    pub fn symbol(self) -> char {
        match self.color {
            Color::White => self.kind.symbol(),
            Color::Black => self.kind.symbol().to_ascii_lowercase(),
        }
    }

    pub fn from_symbol(c: char) -> Option<Piece> {
        let kind = PieceKind::from_symbol(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { kind, color })
    }

    pub fn with_swapped_color(self) -> Piece {
        Piece {
            kind: self.kind,
            color: self.color.opposite(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_round_trip() {
        for c in "PNBRQKpnbrqk".chars() {
            let piece = Piece::from_symbol(c).unwrap();
            assert_eq!(piece.symbol(), c);
        }
        assert_eq!(Piece::from_symbol('x'), None);
        assert_eq!(
            Piece::from_symbol('n'),
            Some(Piece::black(PieceKind::Knight))
        );
    }

    #[test]
    fn test_swapped_color() {
        let rook = Piece::white(PieceKind::Rook);
        assert_eq!(rook.with_swapped_color().symbol(), 'r');
    }

    #[test]
    fn test_movement_kinds() {
        for (kind, slides, count) in [
            (PieceKind::Knight, false, 8),
            (PieceKind::Queen, true, 8),
            (PieceKind::Pawn, false, 2),
        ] {
            let (offsets, sliding) = match kind.movement() {
                Movement::Jumps(offsets) => (offsets, false),
                Movement::Slides(offsets) => (offsets, true),
            };
            assert_eq!(sliding, slides, "{kind:?}");
            assert_eq!(offsets.len(), count, "{kind:?}");
        }
    }
}
