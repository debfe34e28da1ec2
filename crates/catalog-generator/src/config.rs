//! Generator configuration from environment variables

use std::env;
use std::path::PathBuf;

use crate::catalog::NotationStyle;
use crate::error::GeneratorError;

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Hand-written override entries
    pub manual_moves_path: PathBuf,

    pub moves_san_path: PathBuf,
    pub moves_lan_path: PathBuf,
    pub stats_san_path: PathBuf,
    pub stats_lan_path: PathBuf,

    /// Full statistics as JSON; skipped when unset
    pub stats_json_path: Option<PathBuf>,

    /// Threads used per category
    pub workers: usize,
}

impl GeneratorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, GeneratorError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GeneratorError> {
        let path = |key: &str, default: &str| {
            PathBuf::from(lookup(key).unwrap_or_else(|| default.to_string()))
        };

        let workers = match lookup("CATALOG_WORKERS") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    GeneratorError::Config(format!(
                        "CATALOG_WORKERS must be a positive integer, got '{value}'"
                    ))
                })?,
            None => num_cpus::get(),
        };

        Ok(Self {
            manual_moves_path: path("MANUAL_MOVES_PATH", "data/manual-moves.txt"),
            moves_san_path: path("MOVES_SAN_PATH", "data/moves-san.txt"),
            moves_lan_path: path("MOVES_LAN_PATH", "data/moves-lan.txt"),
            stats_san_path: path("STATS_SAN_PATH", "data/stats-san.txt"),
            stats_lan_path: path("STATS_LAN_PATH", "data/stats-lan.txt"),
            stats_json_path: lookup("STATS_JSON_PATH").map(PathBuf::from),
            workers,
        })
    }

    /// Move table and statistics paths for `style`.
    pub fn output_paths(&self, style: NotationStyle) -> (&PathBuf, &PathBuf) {
        match style {
            NotationStyle::San => (&self.moves_san_path, &self.stats_san_path),
            NotationStyle::Lan => (&self.moves_lan_path, &self.stats_lan_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<GeneratorConfig, GeneratorError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GeneratorConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(
            config.manual_moves_path,
            PathBuf::from("data/manual-moves.txt")
        );
        let (moves, stats) = config.output_paths(NotationStyle::Lan);
        assert_eq!(moves, &PathBuf::from("data/moves-lan.txt"));
        assert_eq!(stats, &PathBuf::from("data/stats-lan.txt"));
        assert!(config.stats_json_path.is_none());
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("MOVES_SAN_PATH", "/tmp/san.txt"),
            ("STATS_JSON_PATH", "/tmp/stats.json"),
            ("CATALOG_WORKERS", "3"),
        ])
        .unwrap();
        assert_eq!(config.moves_san_path, PathBuf::from("/tmp/san.txt"));
        assert_eq!(
            config.stats_json_path,
            Some(PathBuf::from("/tmp/stats.json"))
        );
        assert_eq!(config.workers, 3);
    }

    #[test]
    fn test_invalid_workers() {
        for bad in ["0", "many", "-2"] {
            let err = config(&[("CATALOG_WORKERS", bad)]).unwrap_err();
            assert!(matches!(err, GeneratorError::Config(_)));
        }
    }
}
