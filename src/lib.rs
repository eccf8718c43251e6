//! Exemplar k-means clustering of per-day country feature tables.
//!
//! The crate is split into a pure clustering core and the bookkeeping
//! that drives it over a grid of runs.
//!
//! ## Core
//!
//! - [`clustering::Matrix`] — Rectangular, read-only feature rows
//! - [`clustering::Centroids`] — Row indices currently serving as cluster exemplars
//! - [`clustering::Assignment`] — Cluster id per row
//! - [`clustering::KMeans`] — Initialize, assign, recompute, repeat until stable
//!
//! ## Driver
//!
//! - [`dataset`] — CSV tables, column picking, per-day splitting
//! - [`report`] — Similarity tallies and CSV reports
//! - [`sweep`] — Orchestration over (k, feature set, day)

pub mod clustering;
pub mod dataset;
pub mod report;
pub mod sweep;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Feature values parsed from the input tables.
pub type Feature = f64;
/// Euclidean distances between feature vectors.
pub type Energy = f64;
/// Number of other rows a row shared a cluster with, summed over days.
pub type Score = usize;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// K-MEANS CLUSTERING
// ============================================================================
/// Safety cap on assign/recompute passes before a run is declared divergent.
pub const KMEANS_MAX_ITERATIONS: usize = 1024;
/// Cluster counts swept by default.
pub const KMEANS_K_SET: std::ops::RangeInclusive<usize> = 3..=10;

// ============================================================================
// FEATURE SELECTION
// Indices into the feature columns of a day table (label column excluded).
// ============================================================================
/// Feature sets swept by default.
pub const FEATURE_SETS: [&[usize]; 8] = [
    &[7, 10, 12, 14, 16, 24, 27, 28, 29],
    &[7, 10, 24],
    &[7, 10, 14],
    &[7, 14, 16],
    &[24, 28, 29],
    &[12, 27, 29],
    &[7, 10, 14, 16],
    &[7, 12, 14, 24, 29],
];
/// Leading feature values echoed into each day report.
pub const REPORT_ECHO_FEATURES: usize = 3;

// ============================================================================
// PREPROCESSING
// Column layout of the master table: iso_code, continent, location, date, ...
// ============================================================================
/// Columns considered from each master record.
pub const MASTER_COLUMNS: usize = 50;
/// Columns dropped from master records.
pub const MASTER_EXCLUDED: [usize; 3] = [0, 1, 33];
/// Position of the date among the kept columns.
pub const MASTER_DATE_COLUMN: usize = 1;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Writes DEBUG level to `<dir>/<unix-secs>.log`, INFO to terminal.
///
/// `dir` is the directory log files are written into; it is created if
/// missing. The binary passes its `--logs` argument, `logs/` by default.
#[cfg(feature = "cli")]
pub fn log(dir: &std::path::Path) -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all(dir).context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(dir.join(format!("{}.log", time))).context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}
