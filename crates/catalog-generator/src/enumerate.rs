//! Start squares that can reach a given end square.

use notation_core::square::Offset;
use notation_core::{Color, Movement, PieceKind, Square};

/// A possible start square together with the ray (jump or direction index)
/// it lies on. Two pieces on the same ray would block each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub square: Square,
    pub ray: usize,
}

/// Every square from which a white `kind` reaches `to` on an empty board.
///
/// Jump pieces contribute one square per on-board jump. Sliders walk each
/// direction backwards from `to` until the edge.
pub fn start_candidates(kind: PieceKind, to: Square) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    match kind.movement() {
        Movement::Jumps(jumps) => {
            for (ray, &jump) in jumps.iter().enumerate() {
                if let Some(square) = to.offset_back(jump) {
                    candidates.push(Candidate { square, ray });
                }
            }
        }
        Movement::Slides(directions) => {
            for (ray, &direction) in directions.iter().enumerate() {
                let mut next = to.offset_back(direction);
                while let Some(square) = next {
                    candidates.push(Candidate { square, ray });
                    next = square.offset_back(direction);
                }
            }
        }
    }

    candidates
}

/// Map a real square into the white-pawn frame of `color`.
pub fn normalize(square: Square, color: Color) -> Square {
    match color {
        Color::White => square,
        Color::Black => square.reflected(false, true),
    }
}

/// Start of a single pawn push onto the normalized square `to`.
pub fn pawn_push_start(to: Square) -> Option<Square> {
    if to.rank() < 2 {
        return None;
    }
    to.offset(Offset::new(0, -1))
}

/// Start of a double pawn push onto the normalized square `to`.
pub fn pawn_double_push_start(to: Square) -> Option<Square> {
    if to.rank() != 3 {
        return None;
    }
    to.offset(Offset::new(0, -2))
}

/// Starts of pawn captures onto the normalized square `to`, left file first.
pub fn pawn_capture_starts(to: Square) -> Vec<Square> {
    if to.rank() < 2 {
        return Vec::new();
    }
    [Offset::new(-1, -1), Offset::new(1, -1)]
        .into_iter()
        .filter_map(|offset| to.offset(offset))
        .collect()
}

/// Promotion options for a pawn arriving on the normalized square `to`.
/// `None` stands for "no promotion".
pub fn promotions(to: Square) -> Vec<Option<PieceKind>> {
    if to.rank() == 7 {
        PieceKind::PROMOTIONS.into_iter().map(Some).collect()
    } else {
        vec![None]
    }
}
