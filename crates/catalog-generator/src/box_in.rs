//! Surrounding a checked king with white pieces until every flight square is
//! covered.
//!
//! Rooks go on the diagonal corners of the king's 3x3 box. On the edge, when
//! the checking line runs through one of those corners, that rook is replaced
//! by a bishop and knight pair next to the king. In the middle of the board
//! three rooks are enough, so one corner is left empty.

use notation_core::square::BISHOP_DIRECTIONS;
use notation_core::{Piece, PieceKind, Square};

use crate::attacks::{reaches, AttackField};
use crate::synthesis::{Fields, MoveRequest, Scene};

/// Boxing pieces together with the attack field after the move once they
/// stand on the board.
#[derive(Debug, Clone)]
pub(crate) struct BoxedIn {
    pub pieces: Vec<(Square, PieceKind)>,
    pub after: AttackField,
}

/// Try to turn a check on `king` into mate by adding white pieces around it.
pub(crate) fn box_in(
    request: &MoveRequest,
    scene: &Scene,
    fields: &Fields,
    king: Square,
) -> Option<BoxedIn> {
    if king.is_corner() {
        return None;
    }

    let vacancy = fields.after.vacancy(king);
    let corners: Vec<Square> = BISHOP_DIRECTIONS
        .iter()
        .filter_map(|&d| king.offset(d))
        .collect();
    let corner_vacancy = vacancy.filter(|v| corners.contains(v));

    // a second rook next to the king would need its own qualifier
    let rook_lands_adjacent = scene.after[request.to].map(|p| p.kind) == Some(PieceKind::Rook)
        && request.to.is_adjacent(king);

    let rooks = |skip: Square| -> Vec<(Square, PieceKind)> {
        corners
            .iter()
            .filter(|&&c| c != skip)
            .map(|&c| (c, PieceKind::Rook))
            .collect()
    };

    let plans: Vec<Vec<(Square, PieceKind)>> = if king.is_edge() {
        match corner_vacancy {
            Some(v) => {
                // an adjacent checker has to be defended or the king takes it
                let checker_on_v = scene.after[v].is_some_and(Piece::is_white);
                if checker_on_v && !fields.after.is_attacked(v) {
                    return None;
                }

                let mut knight = Square::at(king.file(), v.rank());
                let mut bishop = Square::at(v.file(), king.rank());
                if bishop.is_edge() {
                    std::mem::swap(&mut knight, &mut bishop);
                }

                let mut plan = rooks(v);
                plan.push((knight, PieceKind::Knight));
                plan.push((bishop, PieceKind::Bishop));
                vec![plan]
            }
            None => {
                if rook_lands_adjacent {
                    return None;
                }
                vec![corners.iter().map(|&c| (c, PieceKind::Rook)).collect()]
            }
        }
    } else {
        if rook_lands_adjacent {
            return None;
        }
        match corner_vacancy {
            Some(v) => vec![rooks(v)],
            // any single corner may be the one left empty; try the last first
            None => corners.iter().rev().map(|&c| rooks(c)).collect(),
        }
    };

    plans
        .into_iter()
        .find_map(|plan| verify(request, scene, king, plan))
}

/// Place `plan` on both boards and keep it only if it really mates.
fn verify(
    request: &MoveRequest,
    scene: &Scene,
    king: Square,
    plan: Vec<(Square, PieceKind)>,
) -> Option<BoxedIn> {
    if plan.iter().any(|&(square, _)| !scene.is_free(square)) {
        return None;
    }

    let mut before = scene.before.clone();
    let mut after = scene.after.clone();
    for &(square, kind) in &plan {
        before[square] = Some(Piece::white(kind));
        after[square] = Some(Piece::white(kind));
    }

    let before_field = AttackField::of(&before);
    let after_field = AttackField::of(&after);

    if before_field.is_attacked(king)
        || !after_field.is_attacked(king)
        || !after_field.covers_neighbours(king)
    {
        return None;
    }

    // a boxing piece that could make the same move changes the notation
    let rival = plan
        .iter()
        .filter(|&&(_, kind)| kind == request.piece)
        .any(|&(square, _)| reaches(&before, square, request.to));
    if rival {
        return None;
    }

    Some(BoxedIn {
        pieces: plan,
        after: after_field,
    })
}
