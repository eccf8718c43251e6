use super::*;
use std::collections::BTreeSet;

/// Row indices serving as the current exemplar of each cluster.
///
/// Position `j` holds the row that represents cluster `j`. A freshly drawn
/// set is always distinct, but recomputation may snap two clusters onto the
/// same row, so distinctness is not an invariant of this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Centroids(Vec<usize>);

impl Centroids {
    /// Explicitly chosen starting exemplars. Must be `k` distinct rows of `n`.
    pub fn seeded(indices: Vec<usize>, k: usize, n: usize) -> Result<Self> {
        let centroids = Self(indices);
        if centroids.k() == k && centroids.is_distinct() && centroids.iter().all(|i| i < n) {
            Ok(centroids)
        } else {
            Err(ClusterError::InvalidCentroids {
                indices: centroids.0,
                k,
                n,
            })
        }
    }
    pub fn k(&self) -> usize {
        self.0.len()
    }
    /// exemplar row of cluster j
    pub fn row(&self, j: usize) -> usize {
        self.0[j]
    }
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
    /// Order-insensitive view used by the convergence test.
    pub fn set(&self) -> BTreeSet<usize> {
        self.iter().collect()
    }
    pub fn is_distinct(&self) -> bool {
        self.set().len() == self.k()
    }
    /// True when both refer to the same rows, in any order.
    pub fn same(&self, other: &Self) -> bool {
        self.set() == other.set()
    }
}

impl From<Vec<usize>> for Centroids {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<Centroids> for Vec<usize> {
    fn from(centroids: Centroids) -> Self {
        centroids.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutations_are_the_same_set() {
        let a = Centroids::from(vec![4, 1, 7]);
        let b = Centroids::from(vec![7, 4, 1]);
        assert!(a.same(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn collapsed_duplicates_are_a_different_set() {
        let a = Centroids::from(vec![4, 1, 7]);
        let b = Centroids::from(vec![4, 4, 1]);
        assert!(!a.same(&b));
        assert!(!b.is_distinct());
    }

    #[test]
    fn seeded_rejects_duplicates_and_out_of_range() {
        assert!(Centroids::seeded(vec![0, 2], 2, 4).is_ok());
        assert!(Centroids::seeded(vec![0, 0], 2, 4).is_err());
        assert!(Centroids::seeded(vec![0, 4], 2, 4).is_err());
        assert!(Centroids::seeded(vec![0, 1, 2], 2, 4).is_err());
    }
}
