//! Per end square statistics collected while the catalog is built.

use notation_core::{Board, Square, TerminalStatus};
use serde::Serialize;

use crate::disambiguation::Qualifier;

/// A notation and the position string it is played from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub notation: String,
    pub position: String,
}

/// Groups whose quiet move exists but whose check or mate does not. Each
/// list holds the quiet record of the group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MissingMoves {
    pub checkmate: Vec<MoveRecord>,
    pub check: Vec<MoveRecord>,
    pub both: Vec<MoveRecord>,
}

impl MissingMoves {
    /// Report keys, in the order of [`MissingMoves::lists`].
    pub const KEYS: [&'static str; 3] = ["checkmate", "check", "both"];

    pub fn lists(&self) -> [&[MoveRecord]; 3] {
        [&self.checkmate, &self.check, &self.both]
    }

    /// Record `quiet` against whichever of check and mate is absent.
    pub fn note(&mut self, quiet: &MoveRecord, has_check: bool, has_mate: bool) {
        match (has_check, has_mate) {
            (true, false) => self.checkmate.push(quiet.clone()),
            (false, true) => self.check.push(quiet.clone()),
            (false, false) => self.both.push(quiet.clone()),
            (true, true) => {}
        }
    }
}

/// Statistics for one piece and one end square.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub plain: bool,
    pub files: [bool; 8],
    pub ranks: [bool; 8],
    pub squares: Board<bool>,
    pub reachable: Board<bool>,
    /// Inserted records per terminal status (none, `+`, `#`).
    pub symbol_counts: [usize; 3],
    pub missing: MissingMoves,
}

impl Stats {
    pub fn count(&mut self, status: TerminalStatus) {
        self.symbol_counts[status.index()] += 1;
    }

    /// Remember that a group with `qualifier` produced at least one record.
    pub fn mark(&mut self, qualifier: Qualifier) {
        match qualifier {
            Qualifier::Plain => self.plain = true,
            Qualifier::File(file) => self.files[file as usize] = true,
            Qualifier::Rank(rank) => self.ranks[rank as usize] = true,
            Qualifier::Square(square) => self.squares[square] = true,
        }
    }

    pub fn mark_reachable(&mut self, square: Square) {
        self.reachable[square] = true;
    }

    /// `files/ranks/squares/reachable` counts, as shown in the report grid.
    pub fn summary(&self) -> String {
        let files = self.files.iter().filter(|&&f| f).count();
        let ranks = self.ranks.iter().filter(|&&r| r).count();
        let squares = self.squares.count(|&s| s);
        let reachable = self.reachable.count(|&r| r);
        format!("{files}/{ranks}/{squares}/{reachable}")
    }
}

/// Terminal status counts summed over a whole board.
pub fn symbol_totals(stats: &Board<Stats>) -> [usize; 3] {
    let mut totals = [0; 3];
    for (_, s) in stats.iter() {
        for (total, count) in totals.iter_mut().zip(s.symbol_counts) {
            *total += count;
        }
    }
    totals
}
