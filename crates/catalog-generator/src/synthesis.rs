//! Builds positions that realize a single move under each capture/status
//! combination.
//!
//! The moving side is always white. A capture is staged with a black knight
//! on the end square. The black king is placed on the first square (scan
//! order) that satisfies the requested status, then the white king goes on
//! the first square that cannot interfere. When check or mate cannot be
//! reached by the move alone, a rook or bishop is put behind the start square
//! for a discovered attack.

use std::iter;

use notation_core::square::{Offset, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use notation_core::{Board, Piece, PieceKind, Position, Square, TerminalStatus};

use crate::attacks::AttackField;
use crate::box_in::box_in;

/// Witness positions indexed by (capture, status). Positions are the ones
/// before the move is played.
#[derive(Debug, Clone, Default)]
pub struct VariantSlots {
    rows: [[Option<Position>; 3]; 2],
}

impl VariantSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, capture: bool, status: TerminalStatus) -> Option<&Position> {
        self.rows[capture as usize][status.index()].as_ref()
    }

    pub fn is_full(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_some)
    }

    /// Forget every witness of one row (pawn pushes cannot capture and pawn
    /// captures must).
    pub fn clear_row(&mut self, capture: bool) {
        self.rows[capture as usize] = Default::default();
    }
}

/// One move to realize: `piece` goes from `from` to `to` while `companions`
/// (same kind) could also reach `to`.
#[derive(Debug, Clone, Copy)]
pub struct MoveRequest<'a> {
    pub piece: PieceKind,
    pub from: Square,
    pub to: Square,
    pub companions: &'a [Square],
    pub promotion: Option<PieceKind>,
}

impl<'a> MoveRequest<'a> {
    pub fn new(piece: PieceKind, from: Square, to: Square) -> Self {
        Self {
            piece,
            from,
            to,
            companions: &[],
            promotion: None,
        }
    }

    pub fn with_companions(mut self, companions: &'a [Square]) -> Self {
        self.companions = companions;
        self
    }

    pub fn with_promotion(mut self, promotion: Option<PieceKind>) -> Self {
        self.promotion = promotion;
        self
    }

    /// Piece standing on `to` once the move is played.
    pub fn landed(&self) -> PieceKind {
        self.promotion.unwrap_or(self.piece)
    }
}

/// Boards before and after the move, plus the squares nothing may be put on.
#[derive(Debug, Clone)]
pub(crate) struct Scene {
    pub before: Position,
    pub after: Position,
    pub reserved: Board<bool>,
}

impl Scene {
    pub fn new(request: &MoveRequest) -> Self {
        let mut before = Position::default();
        let mut reserved = Board::filled(false);

        for &square in iter::once(&request.from).chain(request.companions) {
            before[square] = Some(Piece::white(request.piece));

            if request.piece == PieceKind::Knight {
                reserved[square] = true;
            } else {
                // whole line up to the target has to stay open
                let step = Offset::towards(square, request.to);
                let mut current = Some(square);
                while let Some(sq) = current.filter(|&sq| sq != request.to) {
                    reserved[sq] = true;
                    current = sq.offset(step);
                }
            }
        }
        reserved[request.to] = true;

        let mut after = before.clone();
        after[request.from] = None;
        after[request.to] = Some(Piece::white(request.landed()));

        Self {
            before,
            after,
            reserved,
        }
    }

    /// Neither reserved nor occupied on either board.
    pub fn is_free(&self, square: Square) -> bool {
        !self.reserved[square] && self.before[square].is_none() && self.after[square].is_none()
    }

    fn fix(&mut self, square: Square, piece: Option<Piece>) {
        self.before[square] = piece;
        self.after[square] = piece;
        self.reserved[square] = piece.is_some();
    }
}

/// Attack fields of a scene, computed once and shared by all three statuses.
#[derive(Debug, Clone)]
pub(crate) struct Fields {
    pub before: AttackField,
    pub after: AttackField,
}

impl Fields {
    pub fn of(scene: &Scene) -> Self {
        Self {
            before: AttackField::of(&scene.before),
            after: AttackField::of(&scene.after),
        }
    }
}

/// Fill the empty slots of `slots` with positions realizing `request`.
///
/// Slots that already hold a witness are left alone; a full grid returns
/// immediately.
pub fn synthesize(slots: &mut VariantSlots, request: &MoveRequest) {
    if slots.is_full() {
        return;
    }

    let mut scene = Scene::new(request);
    fill_row(&mut slots.rows[0], request, &mut scene);

    scene.before[request.to] = Some(Piece::black(PieceKind::Knight));
    fill_row(&mut slots.rows[1], request, &mut scene);
}

fn fill_row(row: &mut [Option<Position>; 3], request: &MoveRequest, scene: &mut Scene) {
    let fields = Fields::of(scene);
    for status in TerminalStatus::ALL {
        let slot = &mut row[status.index()];
        if slot.is_none() {
            *slot = place_kings(request, scene, &fields, status);
        }
    }

    let discovered = [
        (PieceKind::Rook, &ROOK_DIRECTIONS),
        (PieceKind::Bishop, &BISHOP_DIRECTIONS),
    ];

    for (attacker, directions) in discovered {
        if request.piece == PieceKind::Queen || request.piece == attacker {
            continue;
        }

        for &direction in directions {
            let Some(square) = request.from.offset(direction) else {
                continue;
            };
            if row[1].is_some() && row[2].is_some() {
                break;
            }
            if scene.reserved[square] {
                continue;
            }

            scene.fix(square, Some(Piece::white(attacker)));
            let fields = Fields::of(scene);
            for status in [TerminalStatus::Check, TerminalStatus::Checkmate] {
                let slot = &mut row[status.index()];
                if slot.is_none() {
                    *slot = place_kings(request, scene, &fields, status);
                }
            }
            scene.fix(square, None);
        }
    }
}

/// Place the black king (and the white one, unless it is the mover) so that
/// the move ends with `status`.
fn place_kings(
    request: &MoveRequest,
    scene: &Scene,
    fields: &Fields,
    status: TerminalStatus,
) -> Option<Position> {
    let mover_is_king = request.piece == PieceKind::King;

    for king in Square::all() {
        if !scene.is_free(king) || fields.before.is_attacked(king) {
            continue;
        }
        // kings may never touch
        if mover_is_king && king.is_adjacent(request.to) {
            continue;
        }

        let attacked = fields.after.is_attacked(king);
        let boxed = match status {
            TerminalStatus::Quiet => {
                if attacked {
                    continue;
                }
                None
            }
            TerminalStatus::Check => {
                if !attacked || fields.after.covers_neighbours(king) {
                    continue;
                }
                None
            }
            TerminalStatus::Checkmate => {
                if !attacked {
                    continue;
                }
                if fields.after.covers_neighbours(king) {
                    None
                } else {
                    let vacancy = fields.after.vacancy(king);
                    let placeable = king
                        .neighbours()
                        .filter(|&n| Some(n) != vacancy)
                        .all(|n| !scene.reserved[n]);
                    if !placeable {
                        continue;
                    }
                    match box_in(request, scene, fields, king) {
                        Some(boxed) => Some(boxed),
                        None => continue,
                    }
                }
            }
        };

        let mut position = scene.before.clone();
        let after_field = match &boxed {
            Some(boxed) => {
                for &(square, kind) in &boxed.pieces {
                    position[square] = Some(Piece::white(kind));
                }
                &boxed.after
            }
            None => &fields.after,
        };
        position[king] = Some(Piece::black(PieceKind::King));

        if !mover_is_king {
            let white_king = Square::all().find(|&sq| {
                !scene.reserved[sq]
                    && position[sq].is_none()
                    && !after_field.is_attacked(sq)
                    && !sq.is_within(king, 2)
            })?;
            position[white_king] = Some(Piece::white(PieceKind::King));
        }

        return Some(position);
    }

    None
}
