use crate::clustering::ClusterError;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Cluster(#[from] ClusterError),
    #[error("{path}: table has no header row")]
    Headless { path: String },
    #[error("record {row} has no column {column}")]
    Missing { row: usize, column: usize },
    #[error("{label}: cannot parse {value:?} in feature column {column}")]
    Parse {
        label: String,
        column: usize,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
