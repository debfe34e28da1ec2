//! Squares attacked by the moving (white) side.
//!
//! Each attacked square remembers which neighbouring square has to stay empty
//! for the attack to hold. Knight jumps need nothing; a king or pawn step
//! needs its own square; a slider needs the square it passed last.

use notation_core::{Board, Movement, PieceKind, Position, Square};

/// How a square is attacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attack {
    /// Non-adjacent jump. Nothing can block it.
    Unconditional,
    /// Holds as long as the given neighbouring square stays empty.
    Via(Square),
}

impl Attack {
    pub fn vacancy(self) -> Option<Square> {
        match self {
            Attack::Unconditional => None,
            Attack::Via(square) => Some(square),
        }
    }
}

/// Attack map of one position.
#[derive(Debug, Clone)]
pub struct AttackField {
    cells: Board<Option<Attack>>,
}

impl AttackField {
    /// Compute the field of every white piece in `position`.
    ///
    /// Pieces are visited in scan order and later attacks overwrite earlier
    /// ones. Black pieces only block.
    pub fn of(position: &Position) -> Self {
        let mut cells = Board::filled(None);

        for (square, piece) in position.iter() {
            let Some(piece) = piece else { continue };
            if !piece.is_white() {
                continue;
            }
            for (target, attack) in attacks_from(position, square, piece.kind) {
                cells[target] = Some(attack);
            }
        }

        Self { cells }
    }

    pub fn get(&self, square: Square) -> Option<Attack> {
        self.cells[square]
    }

    pub fn is_attacked(&self, square: Square) -> bool {
        self.cells[square].is_some()
    }

    /// Square that must stay empty for the attack on `square`, if any.
    pub fn vacancy(&self, square: Square) -> Option<Square> {
        self.cells[square].and_then(Attack::vacancy)
    }

    /// True when every on-board neighbour of `square` is attacked.
    pub fn covers_neighbours(&self, square: Square) -> bool {
        square.neighbours().all(|n| self.is_attacked(n))
    }
}

/// Squares a piece of `kind` standing on `from` attacks in `position`.
pub fn attacks_from(position: &Position, from: Square, kind: PieceKind) -> Vec<(Square, Attack)> {
    let mut attacks = Vec::new();

    match kind.movement() {
        Movement::Jumps(jumps) => {
            for &jump in jumps {
                let Some(target) = from.offset(jump) else {
                    continue;
                };
                let attack = if target.is_adjacent(from) {
                    Attack::Via(from)
                } else {
                    Attack::Unconditional
                };
                attacks.push((target, attack));
            }
        }
        Movement::Slides(directions) => {
            for &direction in directions {
                let mut previous = from;
                while let Some(current) = previous.offset(direction) {
                    attacks.push((current, Attack::Via(previous)));
                    if position[current].is_some() {
                        break;
                    }
                    previous = current;
                }
            }
        }
    }

    attacks
}

/// True when the piece on `from` attacks `target`.
pub fn reaches(position: &Position, from: Square, target: Square) -> bool {
    match position[from] {
        Some(piece) => attacks_from(position, from, piece.kind)
            .iter()
            .any(|&(square, _)| square == target),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notation_core::{parse_board, Piece};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_knight_attacks_are_unconditional() {
        let position = parse_board("8/8/8/8/8/8/8/N7 w - - 0 1").unwrap();
        let field = AttackField::of(&position);
        assert_eq!(field.get(sq("b3")), Some(Attack::Unconditional));
        assert_eq!(field.get(sq("c2")), Some(Attack::Unconditional));
        assert!(!field.is_attacked(sq("b2")));
    }

    #[test]
    fn test_adjacent_jump_needs_own_square() {
        let position = parse_board("8/8/8/8/8/8/1P6/K7 w - - 0 1").unwrap();
        let field = AttackField::of(&position);
        assert_eq!(field.vacancy(sq("c3")), Some(sq("b2")));
        assert_eq!(field.vacancy(sq("a2")), Some(sq("a1")));
        // pawn pushes are not attacks
        assert!(!field.is_attacked(sq("b3")));
    }

    #[test]
    fn test_slider_stops_at_first_piece() {
        let position = parse_board("8/8/8/3n4/8/8/8/3R4 w - - 0 1").unwrap();
        let field = AttackField::of(&position);
        assert_eq!(field.vacancy(sq("d2")), Some(sq("d1")));
        assert_eq!(field.vacancy(sq("d4")), Some(sq("d3")));
        // the blocker itself is attacked, the square behind it is not
        assert!(field.is_attacked(sq("d5")));
        assert!(!field.is_attacked(sq("d6")));
    }

    #[test]
    fn test_black_pieces_do_not_attack() {
        let position = parse_board("8/8/8/8/3q4/8/8/8 w - - 0 1").unwrap();
        let field = AttackField::of(&position);
        assert!(Square::all().all(|s| !field.is_attacked(s)));
    }

    #[test]
    fn test_later_pieces_overwrite() {
        // a1 rook reaches c1 via b1; c3 knight (scanned later) overwrites it
        let mut position = Position::default();
        position[sq("a1")] = Some(Piece::white(PieceKind::Rook));
        position[sq("c3")] = Some(Piece::white(PieceKind::Knight));
        let field = AttackField::of(&position);
        assert_eq!(field.get(sq("b1")), Some(Attack::Unconditional));
        assert_eq!(field.get(sq("c1")), Some(Attack::Via(sq("b1"))));
    }

    #[test]
    fn test_covers_neighbours() {
        // rooks on ranks 7 and 8 seal the h8 corner
        let position = parse_board("R7/R7/8/8/8/8/8/8 w - - 0 1").unwrap();
        let field = AttackField::of(&position);
        assert!(field.covers_neighbours(sq("h8")));
        assert!(!field.covers_neighbours(sq("h6")));
    }

    #[test]
    fn test_reaches() {
        let position = parse_board("8/8/8/8/3N4/8/8/R2n4 w - - 0 1").unwrap();
        assert!(reaches(&position, sq("a1"), sq("d1")));
        assert!(!reaches(&position, sq("a1"), sq("e1")));
        assert!(reaches(&position, sq("d4"), sq("e6")));
        assert!(!reaches(&position, sq("h8"), sq("e6")));
    }
}
