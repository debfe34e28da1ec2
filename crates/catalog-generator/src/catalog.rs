//! Catalog assembly: every category, every end square, in canonical order.

use std::collections::HashMap;
use std::thread;

use notation_core::{
    to_fen, Board, Color, MoveNotation, Orientation, PieceKind, Square, TerminalStatus,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::disambiguation::{classify, Qualifier};
use crate::enumerate::{
    normalize, pawn_capture_starts, pawn_double_push_start, pawn_push_start, promotions,
    start_candidates,
};
use crate::overrides::OverrideTable;
use crate::stats::{symbol_totals, MoveRecord, Stats};
use crate::synthesis::{synthesize, MoveRequest, VariantSlots};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotationStyle {
    San,
    Lan,
}

impl NotationStyle {
    /// Column width of the notation in the move table.
    pub fn notation_width(self) -> usize {
        match self {
            NotationStyle::San => 7,
            NotationStyle::Lan => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NotationStyle::San => "SAN",
            NotationStyle::Lan => "LAN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Pawn,
    King,
    Rook,
    Bishop,
    Queen,
    Knight,
    Castle,
}

impl Category {
    /// Output order.
    pub const ALL: [Category; 7] = [
        Category::Pawn,
        Category::King,
        Category::Rook,
        Category::Bishop,
        Category::Queen,
        Category::Knight,
        Category::Castle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Pawn => "Pawn",
            Category::King => "King",
            Category::Rook => "Rook",
            Category::Bishop => "Bishop",
            Category::Queen => "Queen",
            Category::Knight => "Knight",
            Category::Castle => "Castle",
        }
    }

    /// The moving piece; `None` for pawns and castling.
    pub fn piece(self) -> Option<PieceKind> {
        match self {
            Category::King => Some(PieceKind::King),
            Category::Rook => Some(PieceKind::Rook),
            Category::Bishop => Some(PieceKind::Bishop),
            Category::Queen => Some(PieceKind::Queen),
            Category::Knight => Some(PieceKind::Knight),
            Category::Pawn | Category::Castle => None,
        }
    }

    /// Categories whose SAN form needs origin qualifiers.
    pub fn is_disambiguated(self) -> bool {
        matches!(
            self,
            Category::Rook | Category::Bishop | Category::Queen | Category::Knight
        )
    }
}

/// Records and statistics for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResult {
    pub category: Category,
    pub records: Vec<MoveRecord>,
    pub stats: Board<Stats>,
}

impl CategoryResult {
    pub fn symbol_counts(&self) -> [usize; 3] {
        symbol_totals(&self.stats)
    }
}

/// The full catalog for one notation style.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub style: NotationStyle,
    pub categories: Vec<CategoryResult>,
}

impl Catalog {
    /// All records in output order.
    pub fn records(&self) -> impl Iterator<Item = &MoveRecord> {
        self.categories.iter().flat_map(|c| c.records.iter())
    }

    pub fn category(&self, category: Category) -> Option<&CategoryResult> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Notation -> position lookup over the whole catalog.
    pub fn index(&self) -> HashMap<&str, &str> {
        self.records()
            .map(|r| (r.notation.as_str(), r.position.as_str()))
            .collect()
    }
}

/// Build every category for `style`, sharding end squares across `workers`
/// threads. Output does not depend on the worker count.
pub fn build_catalog(style: NotationStyle, overrides: &OverrideTable, workers: usize) -> Catalog {
    let categories = Category::ALL
        .iter()
        .map(|&category| {
            let result = build_category(style, category, overrides, workers);
            info!(
                style = style.name(),
                category = category.name(),
                records = result.records.len(),
                "Category generated"
            );
            result
        })
        .collect();

    Catalog { style, categories }
}

/// Build a single category.
pub fn build_category(
    style: NotationStyle,
    category: Category,
    overrides: &OverrideTable,
    workers: usize,
) -> CategoryResult {
    if category == Category::Castle {
        return castle(overrides);
    }

    let squares: Vec<Square> = Square::all().collect();
    let chunk_size = squares.len().div_ceil(workers.max(1));

    let shards: Vec<Vec<(Square, SquareEntries)>> = thread::scope(|scope| {
        let handles: Vec<_> = squares
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|&to| (to, square_entries(style, category, to, overrides)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    });

    let mut records = Vec::new();
    let mut stats: Board<Stats> = Board::default();
    for (to, entries) in shards.into_iter().flatten() {
        records.extend(entries.records);
        stats[to] = entries.stats;
    }

    CategoryResult {
        category,
        records,
        stats,
    }
}

/// Castling comes from the override table only.
fn castle(overrides: &OverrideTable) -> CategoryResult {
    let mut records = Vec::new();
    let mut stats: Board<Stats> = Board::default();
    let a1 = Square::at(0, 0);

    for base in ["O-O", "O-O-O"] {
        for status in TerminalStatus::ALL {
            let notation = format!("{base}{}", status.symbol());
            if let Some(position) = overrides.get(&notation) {
                records.push(MoveRecord {
                    notation,
                    position: position.to_string(),
                });
                stats[a1].count(status);
            }
        }
    }

    CategoryResult {
        category: Category::Castle,
        records,
        stats,
    }
}

/// Everything produced for one end square.
#[derive(Debug)]
struct SquareEntries {
    records: Vec<MoveRecord>,
    stats: Stats,
}

fn square_entries(
    style: NotationStyle,
    category: Category,
    to: Square,
    overrides: &OverrideTable,
) -> SquareEntries {
    let mut entries = SquareEntries {
        records: Vec::new(),
        stats: Stats::default(),
    };

    match (style, category.piece()) {
        (NotationStyle::San, None) => {
            let color = if to.rank() >= 2 {
                Color::White
            } else {
                Color::Black
            };
            entries.pawn_pushes(style, to, color, overrides);
            entries.pawn_captures(style, to, color, overrides);
        }
        (NotationStyle::Lan, None) => {
            for color in [Color::White, Color::Black] {
                entries.pawn_pushes(style, to, color, overrides);
                entries.pawn_captures(style, to, color, overrides);
                entries.pawn_double_push(to, color, overrides);
            }
        }
        (NotationStyle::San, Some(PieceKind::King)) => entries.san_king(to, overrides),
        (NotationStyle::San, Some(kind)) => entries.san_piece(kind, to, overrides),
        (NotationStyle::Lan, Some(kind)) => entries.lan_piece(kind, to, overrides),
    }

    debug!(
        category = category.name(),
        square = %to,
        records = entries.records.len(),
        "End square done"
    );
    entries
}

impl SquareEntries {
    /// Emit one group's six variants, falling back to the override table for
    /// empty slots. Returns whether anything was emitted.
    fn insert_group(
        &mut self,
        base: &MoveNotation,
        slots: &VariantSlots,
        orientation: Orientation,
        overrides: &OverrideTable,
    ) -> bool {
        let mut inserted = false;

        for capture in [false, true] {
            let mut row: [Option<MoveRecord>; 3] = Default::default();

            for status in TerminalStatus::ALL {
                let notation = base
                    .clone()
                    .with_capture(capture)
                    .with_status(status)
                    .to_string();
                let position = match slots.get(capture, status) {
                    Some(position) => Some(to_fen(position, orientation)),
                    None => overrides.get(&notation).map(str::to_string),
                };

                if let Some(position) = position {
                    let record = MoveRecord { notation, position };
                    self.records.push(record.clone());
                    self.stats.count(status);
                    row[status.index()] = Some(record);
                    inserted = true;
                }
            }

            if let [Some(quiet), check, mate] = &row {
                self.stats
                    .missing
                    .note(quiet, check.is_some(), mate.is_some());
            }
        }

        inserted
    }

    fn san_piece(&mut self, kind: PieceKind, to: Square, overrides: &OverrideTable) {
        let candidates = start_candidates(kind, to);

        let mut groups: HashMap<Qualifier, VariantSlots> = HashMap::new();
        for arrangement in classify(&candidates) {
            let request = MoveRequest::new(kind, arrangement.primary, to)
                .with_companions(&arrangement.companions);
            synthesize(groups.entry(arrangement.qualifier).or_default(), &request);
        }

        let empty = VariantSlots::new();
        for qualifier in Qualifier::all() {
            let slots = groups.get(&qualifier).unwrap_or(&empty);
            let base = MoveNotation::new(Some(kind), qualifier.text(), to);
            if self.insert_group(&base, slots, Orientation::IDENTITY, overrides) {
                self.stats.mark(qualifier);
            }
        }

        for candidate in &candidates {
            self.stats.mark_reachable(candidate.square);
        }
    }

    /// Kings never share a square's reach, so every start feeds one group.
    fn san_king(&mut self, to: Square, overrides: &OverrideTable) {
        let mut slots = VariantSlots::new();
        for candidate in start_candidates(PieceKind::King, to) {
            synthesize(
                &mut slots,
                &MoveRequest::new(PieceKind::King, candidate.square, to),
            );
        }

        let base = MoveNotation::new(Some(PieceKind::King), "", to);
        self.insert_group(&base, &slots, Orientation::IDENTITY, overrides);
    }

    fn lan_piece(&mut self, kind: PieceKind, to: Square, overrides: &OverrideTable) {
        for candidate in start_candidates(kind, to) {
            let mut slots = VariantSlots::new();
            synthesize(&mut slots, &MoveRequest::new(kind, candidate.square, to));

            let base = MoveNotation::new(Some(kind), candidate.square.to_string(), to);
            self.insert_group(&base, &slots, Orientation::IDENTITY, overrides);
        }
    }

    fn pawn_pushes(
        &mut self,
        style: NotationStyle,
        to: Square,
        color: Color,
        overrides: &OverrideTable,
    ) {
        let target = normalize(to, color);
        let Some(from) = pawn_push_start(target) else {
            return;
        };

        let qualifier = match style {
            NotationStyle::San => String::new(),
            NotationStyle::Lan => normalize(from, color).to_string(),
        };

        for promotion in promotions(target) {
            let mut slots = VariantSlots::new();
            synthesize(
                &mut slots,
                &MoveRequest::new(PieceKind::Pawn, from, target).with_promotion(promotion),
            );
            slots.clear_row(true);

            let base = MoveNotation::new(None, qualifier.clone(), to).with_promotion(promotion);
            self.insert_group(&base, &slots, pawn_orientation(color), overrides);
        }
    }

    fn pawn_captures(
        &mut self,
        style: NotationStyle,
        to: Square,
        color: Color,
        overrides: &OverrideTable,
    ) {
        let target = normalize(to, color);

        for promotion in promotions(target) {
            for from in pawn_capture_starts(target) {
                let mut slots = VariantSlots::new();
                synthesize(
                    &mut slots,
                    &MoveRequest::new(PieceKind::Pawn, from, target).with_promotion(promotion),
                );
                slots.clear_row(false);

                let qualifier = match style {
                    NotationStyle::San => from.file_char().to_string(),
                    NotationStyle::Lan => normalize(from, color).to_string(),
                };
                let base = MoveNotation::new(None, qualifier, to).with_promotion(promotion);
                self.insert_group(&base, &slots, pawn_orientation(color), overrides);
            }
        }
    }

    fn pawn_double_push(&mut self, to: Square, color: Color, overrides: &OverrideTable) {
        let target = normalize(to, color);
        let Some(from) = pawn_double_push_start(target) else {
            return;
        };

        let mut slots = VariantSlots::new();
        synthesize(&mut slots, &MoveRequest::new(PieceKind::Pawn, from, target));
        slots.clear_row(true);

        let base = MoveNotation::new(None, normalize(from, color).to_string(), to);
        self.insert_group(&base, &slots, pawn_orientation(color), overrides);
    }
}

fn pawn_orientation(color: Color) -> Orientation {
    match color {
        Color::White => Orientation::IDENTITY,
        Color::Black => Orientation::BLACK_PAWN,
    }
}
