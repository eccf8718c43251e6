use super::*;
use crate::MASTER_COLUMNS;
use crate::MASTER_DATE_COLUMN;
use crate::MASTER_EXCLUDED;
use std::collections::HashMap;
use std::path::Path;

/// Columns of a master record that survive into the day files, date included.
pub fn kept() -> Vec<usize> {
    (0..MASTER_COLUMNS)
        .filter(|c| !MASTER_EXCLUDED.contains(c))
        .collect()
}

/// Split the master table into one file per listed date.
///
/// Each day file repeats the master header (minus the excluded and date
/// columns) and holds that date's records in master order, label first.
/// Dates with no records still get a header-only file. Returns the number
/// of files written.
pub fn preprocess(master: &Path, dates: &[String], out: &Path) -> Result<usize> {
    log::info!("{:<32}{:<32}", "splitting master table", master.display());
    let ref kept = kept();
    let master = Table::read(master)?;
    let header = pick(master.header(), kept)
        .ok_or(DatasetError::Missing {
            row: 0,
            column: MASTER_COLUMNS - 1,
        })
        .map(|h| strip(h, MASTER_DATE_COLUMN))?;
    let mut byday = HashMap::<String, Vec<Vec<String>>>::new();
    for (i, record) in master.records().iter().enumerate() {
        let row = pick(record, kept).ok_or(DatasetError::Missing {
            row: i + 1,
            column: MASTER_COLUMNS - 1,
        })?;
        let date = row[MASTER_DATE_COLUMN].clone();
        byday
            .entry(date)
            .or_default()
            .push(strip(row, MASTER_DATE_COLUMN));
    }
    std::fs::create_dir_all(out)?;
    for date in dates {
        let records = byday.remove(date).unwrap_or_default();
        log::debug!("{:<32}{:<32}", date, records.len());
        Table::new(header.clone(), records).write(&Day::path(out, date))?;
    }
    Ok(dates.len())
}

fn strip(mut row: Vec<String>, column: usize) -> Vec<String> {
    row.remove(column);
    row
}
