use super::*;
use std::path::Path;

/// Header row plus string records, read verbatim from a comma-delimited file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    records: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { header, records }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let mut records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?
            .into_records()
            .map(|r| r.map(|r| r.iter().map(str::to_string).collect::<Vec<String>>()))
            .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()?
            .into_iter();
        let header = records.next().ok_or_else(|| DatasetError::Headless {
            path: path.display().to_string(),
        })?;
        Ok(Self {
            header,
            records: records.collect(),
        })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
        writer.write_record(&self.header)?;
        for record in self.records.iter() {
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }
    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }
    /// one cell from every record
    pub fn column(&self, column: usize) -> Result<Vec<String>> {
        self.records
            .iter()
            .enumerate()
            .map(|(row, r)| {
                r.get(column)
                    .cloned()
                    .ok_or(DatasetError::Missing { row, column })
            })
            .collect()
    }
}

/// Project a row onto `columns`, in the order given.
pub fn pick<T: Clone>(row: &[T], columns: &[usize]) -> Option<Vec<T>> {
    columns.iter().map(|c| row.get(*c).cloned()).collect()
}

/// Dates listed one per record in the first column, after a header row.
pub fn days(path: &Path) -> Result<Vec<String>> {
    Table::read(path)?.column(0)
}

/// Feature names, stored as the single (header) row of a file.
pub fn names(path: &Path) -> Result<Vec<String>> {
    Ok(Table::read(path)?.header().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_preserves_requested_order() {
        let row = ["a", "b", "c", "d"];
        assert_eq!(pick(&row, &[3, 0]), Some(vec!["d", "a"]));
        assert_eq!(pick(&row, &[4]), None);
    }

    #[test]
    fn write_then_read_keeps_header_apart() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("nested").join("t.csv");
        let table = Table::new(
            vec!["location".into(), "cases".into()],
            vec![
                vec!["Chad".into(), "1.5".into()],
                vec!["Peru".into(), "".into()],
            ],
        );
        table.write(path).unwrap();
        let read = Table::read(path).unwrap();
        assert_eq!(read, table);
        assert_eq!(read.column(0).unwrap(), vec!["Chad", "Peru"]);
    }

    #[test]
    fn empty_file_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("empty.csv");
        std::fs::write(path, "").unwrap();
        assert!(matches!(
            Table::read(path),
            Err(DatasetError::Headless { .. })
        ));
    }
}
