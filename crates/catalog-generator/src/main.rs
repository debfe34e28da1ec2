//! Notation catalog generator
//!
//! Builds a witness position for every SAN and LAN move and writes the move
//! tables plus statistics reports.

use std::time::Instant;

use catalog_generator::catalog::{build_catalog, NotationStyle};
use catalog_generator::config::GeneratorConfig;
use catalog_generator::output;
use catalog_generator::overrides::OverrideTable;
use tracing::{info, warn};

/// Parse --no-san / --no-lan from CLI args
fn parse_styles() -> Vec<NotationStyle> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut san = true;
    let mut lan = true;

    for arg in &args {
        match arg.as_str() {
            "--no-san" => san = false,
            "--no-lan" => lan = false,
            other => warn!(arg = other, "Ignoring unknown argument"),
        }
    }

    let mut styles = Vec::new();
    if san {
        styles.push(NotationStyle::San);
    }
    if lan {
        styles.push(NotationStyle::Lan);
    }
    styles
}

fn main() -> anyhow::Result<()> {
    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let styles = parse_styles();
    let config = GeneratorConfig::from_env()?;
    info!(
        manual_moves = %config.manual_moves_path.display(),
        workers = config.workers,
        "Generator config loaded"
    );

    let overrides = OverrideTable::from_path(&config.manual_moves_path)?;
    info!(entries = overrides.len(), "Override table loaded");

    let mut catalogs = Vec::with_capacity(styles.len());
    for style in styles {
        let start = Instant::now();
        let catalog = build_catalog(style, &overrides, config.workers);
        info!(
            style = style.name(),
            records = catalog.records().count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Catalog built"
        );

        let (moves_path, stats_path) = config.output_paths(style);
        output::write_catalog_files(&catalog, moves_path, stats_path)?;
        catalogs.push(catalog);
    }

    if let Some(path) = &config.stats_json_path {
        output::write_file(path, |out| output::write_json(&catalogs, out))?;
    }

    info!("Generation complete");
    Ok(())
}
