//! Move table, statistics report and JSON writers.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use notation_core::square::{file_char, rank_char};
use notation_core::{Board, Square};
use tracing::info;

use crate::catalog::{Catalog, Category, NotationStyle};
use crate::error::GeneratorError;
use crate::stats::{MissingMoves, Stats};

/// Files and ranks covered by the report. The rest of the board follows by
/// reflection.
const REPORT_FILES: std::ops::Range<u8> = 0..4;
const REPORT_RANKS: std::ops::Range<u8> = 0..4;

/// One line per record: notation padded to the style's width, then the
/// position string.
pub fn write_moves<W: Write>(catalog: &Catalog, out: &mut W) -> io::Result<()> {
    let width = catalog.style.notation_width();
    for record in catalog.records() {
        if record.position.is_empty() {
            writeln!(out, "{}", record.notation)?;
        } else {
            writeln!(out, "{:<width$} {}", record.notation, record.position)?;
        }
    }
    Ok(())
}

/// Human-readable statistics report.
pub fn write_stats<W: Write>(catalog: &Catalog, out: &mut W) -> io::Result<()> {
    let mut total = 0;
    let mut totals = [0usize; 3];

    for result in &catalog.categories {
        let counts = result.symbol_counts();
        let count = result.records.len();
        total += count;
        for (t, c) in totals.iter_mut().zip(counts) {
            *t += c;
        }

        writeln!(
            out,
            "{} : {} ({})\n",
            result.category.name(),
            count,
            join_counts(counts)
        )?;

        if result.category == Category::Castle {
            writeln!(out)?;
            continue;
        }

        if catalog.style == NotationStyle::San && result.category.is_disambiguated() {
            write_grid(out, &result.stats)?;
            writeln!(out)?;
        }

        for (slot, key) in MissingMoves::KEYS.iter().enumerate() {
            writeln!(out, "Missing {key}:")?;
            let mut any = false;
            for file in REPORT_FILES {
                for rank in REPORT_RANKS {
                    let missing = &result.stats[Square::at(file, rank)].missing;
                    for record in missing.lists()[slot] {
                        writeln!(out, "{:<6} {}", record.notation, record.position)?;
                        any = true;
                    }
                }
            }
            if !any {
                writeln!(out, "-")?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Total : {} ({})", total, join_counts(totals))
}

fn join_counts(counts: [usize; 3]) -> String {
    format!("{}/{}/{}", counts[0], counts[1], counts[2])
}

/// ASCII grid of `files/ranks/squares/reachable` for the report squares,
/// highest rank first.
fn write_grid<W: Write>(out: &mut W, stats: &Board<Stats>) -> io::Result<()> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    rows.push(
        std::iter::once(String::new())
            .chain(REPORT_FILES.map(|f| file_char(f).to_string()))
            .collect(),
    );
    for rank in REPORT_RANKS.rev() {
        rows.push(
            std::iter::once(rank_char(rank).to_string())
                .chain(REPORT_FILES.map(|f| stats[Square::at(f, rank)].summary()))
                .collect(),
        );
    }

    let columns = rows[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|c| rows.iter().map(|r| r[c].len()).max().unwrap_or(0))
        .collect();

    let border: String = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .chain(std::iter::once("+".to_string()))
        .collect();

    writeln!(out, "{border}")?;
    for (i, row) in rows.iter().enumerate() {
        for (cell, w) in row.iter().zip(&widths) {
            write!(out, "| {cell:^w$} ")?;
        }
        writeln!(out, "|")?;
        if i == 0 {
            writeln!(out, "{border}")?;
        }
    }
    writeln!(out, "{border}")
}

/// Pretty-printed JSON of the full catalogs, stats included.
pub fn write_json<W: Write>(catalogs: &[Catalog], out: &mut W) -> Result<(), GeneratorError> {
    serde_json::to_writer_pretty(&mut *out, catalogs)?;
    writeln!(out).map_err(|e| GeneratorError::io("<json>", e))
}

/// Create `path` (and its parent directories) and hand a buffered writer to
/// `write`.
pub fn write_file<F>(path: &Path, write: F) -> Result<(), GeneratorError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), GeneratorError>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| GeneratorError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write(&mut out)?;
    out.flush().map_err(|e| GeneratorError::io(path, e))?;

    info!(path = %path.display(), "Wrote output file");
    Ok(())
}

/// Write the move table and statistics report of `catalog`.
pub fn write_catalog_files(
    catalog: &Catalog,
    moves_path: &Path,
    stats_path: &Path,
) -> Result<(), GeneratorError> {
    write_file(moves_path, |out| {
        write_moves(catalog, out).map_err(|e| GeneratorError::io(moves_path, e))
    })?;
    write_file(stats_path, |out| {
        write_stats(catalog, out).map_err(|e| GeneratorError::io(stats_path, e))
    })
}
