use super::*;
use crate::clustering::ClusterError;
use crate::clustering::Clustering;
use crate::clustering::KMeans;
use crate::dataset::DatasetError;
use crate::dataset::Day;
use crate::dataset::Sample;
use crate::dataset::pick;
use crate::report::Reporter;
use crate::report::Tally;
use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::path::Path;

/// Clusters every day under every (k, feature set) pair and reports on it.
///
/// All days are loaded once up front. Each (k, feature set) pair is an
/// independent unit of work with its own tally, so pairs run in parallel.
/// Every invocation draws from its own RNG, seeded from the run seed and
/// the (k, feature set, date) it serves.
pub struct Sweep {
    config: Config,
    names: Vec<String>,
    days: Vec<Day>,
    seed: u64,
    reporter: Reporter,
}

/// Counts accumulated over a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// clustering invocations that converged
    pub runs: usize,
    /// days skipped for having no rows or fewer rows than k
    pub skipped: usize,
    /// assign/recompute passes summed over all runs
    pub iterations: usize,
}

impl Summary {
    fn merge(self, other: Self) -> Self {
        Self {
            runs: self.runs + other.runs,
            skipped: self.skipped + other.skipped,
            iterations: self.iterations + other.iterations,
        }
    }
}

impl Sweep {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let dates = crate::dataset::days(&config.days_file())
            .with_context(|| format!("read {}", config.days_file().display()))?;
        log::info!("{:<32}{:<32}", "loading days", dates.len());
        let days = dates
            .iter()
            .map(|date| Day::load(&config.data, date))
            .collect::<Result<Vec<Day>, _>>()
            .context("load day files")?;
        let names = match config.names_file() {
            ref path if path.exists() => crate::dataset::names(path)
                .with_context(|| format!("read {}", path.display()))?,
            _ => days
                .first()
                .and_then(|day| day.table().header().get(1..))
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
        };
        let run = chrono::Local::now().format("%d.%m.%Y_%H.%M").to_string();
        let reporter = Reporter::new(config.output.join(run));
        let seed = config.seed();
        log::info!("{:<32}{:<32}", "seeding runs", seed);
        Ok(Self {
            config,
            names,
            days,
            seed,
            reporter,
        })
    }

    /// Run directory all reports are written under.
    pub fn root(&self) -> &Path {
        self.reporter.root()
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run(&self) -> anyhow::Result<Summary> {
        let sets = (0..self.config.features.len())
            .map(|f| self.names(f))
            .collect::<anyhow::Result<Vec<Vec<String>>>>()?;
        self.reporter.metrics(&self.config.ks, &sets)?;
        let summary = self
            .config
            .ks
            .iter()
            .flat_map(|&k| (0..self.config.features.len()).map(move |f| (k, f)))
            .collect::<Vec<(usize, usize)>>()
            .into_par_iter()
            .map(|(k, f)| self.pair(k, f))
            .collect::<anyhow::Result<Vec<Summary>>>()?
            .into_iter()
            .fold(Summary::default(), Summary::merge);
        log::info!(
            "{:<32}{:<32}",
            "sweep complete",
            format!("{} runs, {} skipped", summary.runs, summary.skipped)
        );
        Ok(summary)
    }

    /// Every day under one (k, feature set), then that pair's nation reports.
    fn pair(&self, k: usize, f: usize) -> anyhow::Result<Summary> {
        let ref features = self.config.features[f];
        let ref names = self.names(f)?;
        let mut tally = Tally::default();
        let mut summary = Summary::default();
        for day in self.days.iter() {
            let ref sample = match day.sample(features, self.config.drop_incomplete) {
                Ok(sample) => sample,
                Err(DatasetError::Cluster(ClusterError::EmptyMatrix)) => {
                    log::warn!(
                        "{:<32}{:<32}",
                        format!("k{} f{} {}", k, f, day.date()),
                        "skipped, no rows"
                    );
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("k{} f{} {}", k, f, day.date()));
                }
            };
            let ref mut rng = SmallRng::seed_from_u64(seed(self.seed, k, f, day.date()));
            match cluster(sample, k, self.config.max_iterations, rng) {
                Ok(clustering) => {
                    self.reporter
                        .day(k, f, day.date(), names, sample, &clustering.assignment)?;
                    tally.absorb(&sample.labels, &clustering.assignment);
                    summary.runs += 1;
                    summary.iterations += clustering.iterations;
                }
                Err(ClusterError::InvalidK { n, .. }) => {
                    log::warn!(
                        "{:<32}{:<32}",
                        format!("k{} f{} {}", k, f, day.date()),
                        format!("skipped, only {} rows", n)
                    );
                    summary.skipped += 1;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("k{} f{} {}", k, f, day.date()));
                }
            }
        }
        let written = self.reporter.nations(k, f, &tally)?;
        log::info!(
            "{:<32}{:<32}",
            format!("finished k{} f{}", k, f),
            format!("{} runs, {} nations", summary.runs, written)
        );
        Ok(summary)
    }

    fn names(&self, f: usize) -> anyhow::Result<Vec<String>> {
        pick(&self.names, &self.config.features[f])
            .ok_or_else(|| anyhow::anyhow!("feature set f{} names a missing column", f))
    }
}

/// Cluster one sample with a caller-supplied source of randomness.
pub fn cluster(
    sample: &Sample,
    k: usize,
    max_iterations: usize,
    rng: &mut SmallRng,
) -> Result<Clustering, ClusterError> {
    KMeans::new(&sample.matrix, k)?
        .capped(max_iterations)
        .cluster(rng)
}

/// Load one day and cluster it under a single feature set.
pub fn cluster_day(
    config: &Config,
    date: &str,
    features: &[usize],
    k: usize,
) -> anyhow::Result<(Sample, Clustering)> {
    let day = Day::load(&config.data, date).with_context(|| format!("load {}", date))?;
    let sample = day.sample(features, config.drop_incomplete)?;
    let ref mut rng = SmallRng::seed_from_u64(seed(config.seed(), k, 0, date));
    let clustering = cluster(&sample, k, config.max_iterations, rng)?;
    Ok((sample, clustering))
}

/// Seed for one invocation, independent of the order invocations run in.
pub fn seed(seed: u64, k: usize, f: usize, date: &str) -> u64 {
    let ref mut hasher = DefaultHasher::default();
    (seed, k, f, date).hash(hasher);
    hasher.finish()
}
