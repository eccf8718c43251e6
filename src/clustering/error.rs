/// Failures of a single clustering invocation.
///
/// Every variant is fatal to the invocation that raised it. Empty clusters
/// are not represented here; they are tolerated and only logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClusterError {
    #[error("cannot compare vectors of width {left} and {right}")]
    InvalidDimension { left: usize, right: usize },
    #[error("k = {k} is outside 1..={n}")]
    InvalidK { k: usize, n: usize },
    #[error("centroids did not settle within {iterations} iterations")]
    NonConvergence { iterations: usize },
    #[error("matrix has no rows")]
    EmptyMatrix,
    #[error("matrix rows have no features")]
    Featureless,
    #[error("row {row} has width {width}, expected {expected}")]
    Ragged {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[error("no candidates to compare against")]
    NoCandidates,
    #[error("centroid indices {indices:?} are not {k} distinct rows of {n}")]
    InvalidCentroids {
        indices: Vec<usize>,
        k: usize,
        n: usize,
    },
    #[error("assignment covers {len} rows of {n}")]
    AssignmentLength { len: usize, n: usize },
    #[error("row {row} is assigned to cluster {id}, outside 0..{k}")]
    InvalidCluster { row: usize, id: usize, k: usize },
}

pub type Result<T> = std::result::Result<T, ClusterError>;
