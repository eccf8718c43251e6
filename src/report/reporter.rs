use super::*;
use crate::REPORT_ECHO_FEATURES;
use crate::Score;
use crate::clustering::Assignment;
use crate::dataset::Day;
use crate::dataset::Sample;
use anyhow::Context;
use std::path::Path;
use std::path::PathBuf;

/// Writes the CSV reports of one sweep under a single run directory.
///
/// ```text
/// <root>/_metrics.csv
/// <root>/k{k}/f{f}/days/<date>.csv
/// <root>/k{k}/f{f}/nations/<label>.csv
/// ```
#[derive(Debug, Clone)]
pub struct Reporter {
    root: PathBuf,
}

#[derive(serde::Serialize)]
struct Similarity<'a> {
    #[serde(rename = "Nation")]
    nation: &'a str,
    #[serde(rename = "Similarity Score")]
    score: Score,
}

impl Reporter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
    pub fn root(&self) -> &Path {
        &self.root
    }
    pub fn dir(&self, k: usize, f: usize) -> PathBuf {
        self.root.join(format!("k{}", k)).join(format!("f{}", f))
    }

    /// The swept k values and the feature names of each set, written once per run.
    pub fn metrics(&self, ks: &[usize], sets: &[Vec<String>]) -> anyhow::Result<()> {
        let ref path = self.root.join("_metrics.csv");
        let mut writer = Self::writer(path)?;
        writer.write_record(
            std::iter::once("k_set".to_string()).chain(std::iter::once(format!("{:?}", ks))),
        )?;
        for (f, names) in sets.iter().enumerate() {
            writer.write_record(std::iter::once(format!("f{}", f)).chain(names.iter().cloned()))?;
        }
        writer.flush().context("flush metrics")?;
        Ok(())
    }

    /// Label, cluster id and the leading feature values of each row of one day.
    pub fn day(
        &self,
        k: usize,
        f: usize,
        date: &str,
        names: &[String],
        sample: &Sample,
        assignment: &Assignment,
    ) -> anyhow::Result<()> {
        let ref path = self.dir(k, f).join("days").join(Day::file(date));
        let mut writer = Self::writer(path)?;
        writer.write_record(
            ["country", "cluster"]
                .into_iter()
                .map(str::to_string)
                .chain(names.iter().take(REPORT_ECHO_FEATURES).cloned()),
        )?;
        for ((label, j), cells) in sample
            .labels
            .iter()
            .zip(assignment.ids())
            .zip(sample.cells.iter())
        {
            writer.write_record(
                [label.clone(), j.to_string()]
                    .into_iter()
                    .chain(cells.iter().take(REPORT_ECHO_FEATURES).cloned()),
            )?;
        }
        writer.flush().context("flush day report")?;
        Ok(())
    }

    /// One file per label listing everyone it shared a cluster with.
    pub fn nations(&self, k: usize, f: usize, tally: &Tally) -> anyhow::Result<usize> {
        let ref dir = self.dir(k, f).join("nations");
        let mut written = 0;
        for label in tally.labels() {
            let ref path = dir.join(format!("{}.csv", label.replace('/', "_")));
            let mut writer = csv::WriterBuilder::new()
                .has_headers(true)
                .from_writer(Self::create(path)?);
            let mut rows = tally.neighbors(label).peekable();
            if rows.peek().is_none() {
                writer.write_record(["Nation", "Similarity Score"])?;
            }
            for (nation, score) in rows {
                writer.serialize(Similarity { nation, score })?;
            }
            writer.flush().context("flush nation report")?;
            written += 1;
        }
        Ok(written)
    }

    fn writer(path: &Path) -> anyhow::Result<csv::Writer<std::fs::File>> {
        Ok(csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Self::create(path)?))
    }

    fn create(path: &Path) -> anyhow::Result<std::fs::File> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        std::fs::File::create(path).with_context(|| format!("create {}", path.display()))
    }
}
