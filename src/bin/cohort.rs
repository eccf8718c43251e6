//! Cohort Binary
//!
//! Split a master table into day files, cluster a single day,
//! or sweep every (k, feature set, day) combination.

use anyhow::Context;
use clap::Parser;
use cohort::sweep::Config;
use cohort::sweep::Sweep;
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Command {
    #[command(about = "Split the master table into one file per day", alias = "pre")]
    Preprocess {
        #[arg(required = true)]
        master: PathBuf,
        #[arg(long, default_value = "src/data")]
        data: PathBuf,
        #[arg(long, help = "dates to split out [default: <data>/_days.csv]")]
        days: Option<PathBuf>,
        #[arg(long, default_value = "logs")]
        logs: PathBuf,
    },
    #[command(about = "Cluster a single day under one feature set", alias = "one")]
    Cluster {
        #[arg(required = true)]
        date: String,
        #[arg(short, long)]
        k: usize,
        #[arg(short, long, value_delimiter = ',', required = true)]
        features: Vec<usize>,
        #[command(flatten)]
        common: Common,
    },
    #[command(about = "Cluster every day under every k and feature set")]
    Sweep {
        #[arg(long, value_delimiter = ',')]
        ks: Vec<usize>,
        #[arg(long = "set", help = "comma separated feature indices, repeatable")]
        sets: Vec<String>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        common: Common,
    },
}

#[derive(clap::Args)]
struct Common {
    #[arg(long, help = "JSON file of sweep settings")]
    config: Option<PathBuf>,
    #[arg(long)]
    data: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    max_iterations: Option<usize>,
    #[arg(long)]
    drop_incomplete: bool,
    #[arg(long, default_value = "logs")]
    logs: PathBuf,
}

impl Common {
    /// file settings (or defaults) with flags applied on top
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(ref data) = self.data {
            config.data = data.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(t) = self.max_iterations {
            config.max_iterations = t;
        }
        config.drop_incomplete |= self.drop_incomplete;
        Ok(config)
    }
}

impl Command {
    fn logs(&self) -> &Path {
        match self {
            Self::Preprocess { logs, .. } => logs,
            Self::Cluster { common, .. } => &common.logs,
            Self::Sweep { common, .. } => &common.logs,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let command = Command::parse();
    cohort::log(command.logs())?;
    match command {
        Command::Preprocess {
            master, data, days, ..
        } => {
            let ref days = days.unwrap_or_else(|| data.join("_days.csv"));
            let dates = cohort::dataset::days(days)
                .with_context(|| format!("read {}", days.display()))?;
            let written = cohort::dataset::preprocess(&master, &dates, &data)?;
            log::info!("{:<32}{:<32}", "day files written", written);
        }
        Command::Cluster {
            date,
            k,
            features,
            common,
        } => {
            let ref config = common.config()?;
            let (sample, clustering) = cohort::sweep::cluster_day(config, &date, &features, k)?;
            log::info!(
                "{:<32}{:<32}",
                format!("converged after {}", clustering.iterations),
                format!("exemplars {:?}", clustering.centroids.indices())
            );
            for (label, j) in sample.labels.iter().zip(clustering.assignment.ids()) {
                println!("{:<32}{:>4}", label, j);
            }
        }
        Command::Sweep {
            ks,
            sets,
            output,
            common,
        } => {
            let mut config = common.config()?;
            if !ks.is_empty() {
                config.ks = ks;
            }
            if !sets.is_empty() {
                config.features = sets
                    .iter()
                    .map(|set| parse(set))
                    .collect::<anyhow::Result<Vec<Vec<usize>>>>()?;
            }
            if let Some(output) = output {
                config.output = output;
            }
            let sweep = Sweep::new(config)?;
            log::info!("{:<32}{:<32}", "writing reports to", sweep.root().display());
            let summary = sweep.run()?;
            log::info!(
                "{:<32}{:<32}",
                "mean passes per run",
                summary.iterations as f64 / summary.runs.max(1) as f64
            );
        }
    }
    Ok(())
}

fn parse(set: &str) -> anyhow::Result<Vec<usize>> {
    set.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>().with_context(|| format!("bad feature index {:?}", s)))
        .collect()
}
