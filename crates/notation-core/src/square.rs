//! Square and offset arithmetic on the 8x8 board.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::NotationError;

/// A (file, rank) step between two squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub file: i8,
    pub rank: i8,
}

impl Offset {
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    /// Unit step from `from` towards `to` (each component in -1..=1).
    pub fn towards(from: Square, to: Square) -> Self {
        Self {
            file: (to.file as i8 - from.file as i8).signum(),
            rank: (to.rank as i8 - from.rank as i8).signum(),
        }
    }
}

/// King steps, in the order that defines their ray tags.
pub const KING_JUMPS: [Offset; 8] = [
    Offset::new(1, 1),
    Offset::new(1, 0),
    Offset::new(1, -1),
    Offset::new(0, 1),
    Offset::new(0, -1),
    Offset::new(-1, 1),
    Offset::new(-1, 0),
    Offset::new(-1, -1),
];

pub const KNIGHT_JUMPS: [Offset; 8] = [
    Offset::new(1, 2),
    Offset::new(1, -2),
    Offset::new(-1, 2),
    Offset::new(-1, -2),
    Offset::new(2, 1),
    Offset::new(2, -1),
    Offset::new(-2, 1),
    Offset::new(-2, -1),
];

/// Diagonal captures of a white pawn.
pub const PAWN_CAPTURES: [Offset; 2] = [Offset::new(1, 1), Offset::new(-1, 1)];

pub const ROOK_DIRECTIONS: [Offset; 4] = [
    Offset::new(1, 0),
    Offset::new(-1, 0),
    Offset::new(0, 1),
    Offset::new(0, -1),
];

pub const BISHOP_DIRECTIONS: [Offset; 4] = [
    Offset::new(1, 1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
    Offset::new(-1, -1),
];

pub const QUEEN_DIRECTIONS: [Offset; 8] = [
    Offset::new(1, 0),
    Offset::new(-1, 0),
    Offset::new(0, 1),
    Offset::new(0, -1),
    Offset::new(1, 1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
    Offset::new(-1, -1),
];

/// A square on the board. File and rank are both in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square, or `None` if the coordinates are off the board.
    pub fn new(file: i8, rank: i8) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Build a square from indices already known to be on the board.
    pub const fn at(file: u8, rank: u8) -> Square {
        debug_assert!(file < 8 && rank < 8);
        Square { file, rank }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Every square in canonical scan order: a1, a2, ..., a8, b1, ..., h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|file| (0..8u8).map(move |rank| Square { file, rank }))
    }

    pub fn offset(self, by: Offset) -> Option<Square> {
        Square::new(self.file as i8 + by.file, self.rank as i8 + by.rank)
    }

    pub fn offset_back(self, by: Offset) -> Option<Square> {
        Square::new(self.file as i8 - by.file, self.rank as i8 - by.rank)
    }

    /// True if both coordinate distances are at most `dist` (a `2*dist+1` wide box).
    pub fn is_within(self, other: Square, dist: u8) -> bool {
        self.file.abs_diff(other.file) <= dist && self.rank.abs_diff(other.rank) <= dist
    }

    pub fn is_adjacent(self, other: Square) -> bool {
        self.is_within(other, 1)
    }

    pub fn is_corner(self) -> bool {
        matches!(self.file, 0 | 7) && matches!(self.rank, 0 | 7)
    }

    pub fn is_edge(self) -> bool {
        matches!(self.file, 0 | 7) || matches!(self.rank, 0 | 7)
    }

    /// All on-board squares one king step away.
    pub fn neighbours(self) -> impl Iterator<Item = Square> {
        KING_JUMPS
            .into_iter()
            .filter_map(move |jump| self.offset(jump))
    }

    /// Reflect files (a<->h) and/or ranks (1<->8).
    pub fn reflected(self, flip_files: bool, flip_ranks: bool) -> Square {
        Square {
            file: if flip_files { 7 - self.file } else { self.file },
            rank: if flip_ranks { 7 - self.rank } else { self.rank },
        }
    }

    pub fn file_char(self) -> char {
        file_char(self.file)
    }

    pub fn rank_char(self) -> char {
        rank_char(self.rank)
    }
}

pub fn file_char(file: u8) -> char {
    char::from(b'a' + file)
}

pub fn rank_char(rank: u8) -> char {
    char::from(b'1' + rank)
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok(Square::at(f - b'a', r - b'1')),
            _ => Err(NotationError::InvalidSquare(s.to_string())),
        }
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
