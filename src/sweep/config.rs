use crate::FEATURE_SETS;
use crate::KMEANS_K_SET;
use crate::KMEANS_MAX_ITERATIONS;
use anyhow::Context;
use std::path::Path;
use std::path::PathBuf;

/// Environment variable consulted when no seed is configured.
pub const SEED_VAR: &str = "COHORT_SEED";

/// Runtime settings of a sweep.
///
/// Every field has a default, so a JSON file only needs the fields it
/// changes. Command-line flags are applied on top of whatever was loaded.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// directory of day files plus `_days.csv` and `_feature_names.csv`
    pub data: PathBuf,
    /// parent of the timestamped run directories
    pub output: PathBuf,
    pub ks: Vec<usize>,
    /// feature column indices of each set, label column excluded
    pub features: Vec<Vec<usize>>,
    pub seed: Option<u64>,
    pub max_iterations: usize,
    /// skip rows with blank or non-numeric selected cells
    pub drop_incomplete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: PathBuf::from("src/data"),
            output: PathBuf::from("src/out"),
            ks: KMEANS_K_SET.collect(),
            features: FEATURE_SETS.iter().map(|set| set.to_vec()).collect(),
            seed: None,
            max_iterations: KMEANS_MAX_ITERATIONS,
            drop_incomplete: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open config {}", path.display()))?;
        serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("parse config {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.ks.is_empty(), "no k values to sweep");
        anyhow::ensure!(self.ks.iter().all(|k| *k > 0), "k values must be positive");
        anyhow::ensure!(!self.features.is_empty(), "no feature sets to sweep");
        anyhow::ensure!(
            self.features.iter().all(|set| !set.is_empty()),
            "feature sets must not be empty"
        );
        anyhow::ensure!(self.max_iterations > 0, "max_iterations must be positive");
        Ok(())
    }

    pub fn days_file(&self) -> PathBuf {
        self.data.join("_days.csv")
    }
    pub fn names_file(&self) -> PathBuf {
        self.data.join("_feature_names.csv")
    }

    /// Configured seed, else `COHORT_SEED`, else a fresh random one.
    pub fn seed(&self) -> u64 {
        self.seed
            .or_else(|| {
                std::env::var(SEED_VAR)
                    .ok()
                    .and_then(|s| s.trim().parse::<u64>().ok())
            })
            .unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sweep_the_standard_grid() {
        let config = Config::default();
        assert_eq!(config.ks, vec![3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(config.features.len(), 8);
        assert_eq!(config.features[1], vec![7, 10, 24]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("config.json");
        std::fs::write(path, r#"{ "ks": [2], "seed": 9, "drop_incomplete": true }"#).unwrap();
        let config = Config::load(path).unwrap();
        assert_eq!(config.ks, vec![2]);
        assert_eq!(config.seed(), 9);
        assert!(config.drop_incomplete);
        assert_eq!(config.max_iterations, KMEANS_MAX_ITERATIONS);
    }

    #[test]
    fn empty_grids_are_rejected() {
        let config = Config {
            ks: vec![],
            ..Config::default()
        };
        assert!(config.validate().is_err());
        let config = Config {
            features: vec![vec![]],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
