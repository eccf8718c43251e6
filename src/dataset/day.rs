use super::*;
use crate::Feature;
use crate::clustering::Matrix;
use std::path::Path;
use std::path::PathBuf;

/// One day of labelled feature rows.
///
/// The first column of the file is the row label (a country); every other
/// column is a feature. Feature indices used elsewhere count from the first
/// feature column, so index 0 is the column right after the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    date: String,
    table: Table,
}

/// Labels and the numeric rows parsed for one feature selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub labels: Vec<String>,
    /// selected cells as they appear in the file
    pub cells: Vec<Vec<String>>,
    pub matrix: Matrix,
}

impl Day {
    /// File name of a date: `2020/03/01` is stored as `2020_03_01.csv`.
    pub fn file(date: &str) -> String {
        format!("{}.csv", date.replace('/', "_"))
    }
    pub fn path(dir: &Path, date: &str) -> PathBuf {
        dir.join(Self::file(date))
    }

    pub fn load(dir: &Path, date: &str) -> Result<Self> {
        Ok(Self {
            date: date.to_string(),
            table: Table::read(&Self::path(dir, date))?,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn n(&self) -> usize {
        self.table.records().len()
    }

    /// Names of the selected features, as given by this file's header.
    pub fn names(&self, features: &[usize]) -> Option<Vec<String>> {
        self.table
            .header()
            .get(1..)
            .and_then(|header| pick(header, features))
    }

    /// Parse the selected features of every row.
    ///
    /// With `drop_incomplete`, rows holding a blank or non-numeric selected
    /// cell are skipped instead of failing the whole day. A day left with
    /// no rows fails with [`ClusterError::EmptyMatrix`].
    ///
    /// [`ClusterError::EmptyMatrix`]: crate::clustering::ClusterError::EmptyMatrix
    pub fn sample(&self, features: &[usize], drop_incomplete: bool) -> Result<Sample> {
        let mut labels = Vec::with_capacity(self.n());
        let mut cells = Vec::with_capacity(self.n());
        let mut rows = Vec::with_capacity(self.n());
        for (i, record) in self.table.records().iter().enumerate() {
            let label = record
                .first()
                .ok_or(DatasetError::Missing { row: i, column: 0 })?;
            match Self::parse(label, &record[1..], features) {
                Ok(row) => {
                    labels.push(label.clone());
                    cells.push(Self::cells(&record[1..], features));
                    rows.push(row);
                }
                Err(DatasetError::Parse { column, value, .. }) if drop_incomplete => {
                    log::warn!(
                        "{:<32}{:<32}",
                        format!("{} dropping {}", self.date, label),
                        format!("column {} = {:?}", column, value)
                    );
                }
                Err(e) => return Err(e),
            }
        }
        let matrix = Matrix::try_from(rows)?;
        Ok(Sample {
            labels,
            cells,
            matrix,
        })
    }

    fn cells(cells: &[String], features: &[usize]) -> Vec<String> {
        features
            .iter()
            .map(|&column| cells.get(column).cloned().unwrap_or_default())
            .collect()
    }

    fn parse(label: &str, cells: &[String], features: &[usize]) -> Result<Vec<Feature>> {
        features
            .iter()
            .map(|&column| {
                let value = cells.get(column).map(String::as_str).unwrap_or("");
                value
                    .trim()
                    .parse::<Feature>()
                    .ok()
                    .filter(|x| x.is_finite())
                    .ok_or_else(|| DatasetError::Parse {
                        label: label.to_string(),
                        column,
                        value: value.to_string(),
                    })
            })
            .collect()
    }
}
