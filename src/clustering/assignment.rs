use super::*;
use crate::Feature;

/// Cluster id of every matrix row, in row order. Ids lie in `0..k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment(Vec<usize>);

impl Assignment {
    pub fn ids(&self) -> &[usize] {
        &self.0
    }
    pub fn n(&self) -> usize {
        self.0.len()
    }
    /// rows assigned to cluster j
    pub fn members(&self, j: usize) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == j)
            .map(|(i, _)| i)
    }
    /// population of each of the k clusters
    pub fn sizes(&self, k: usize) -> Vec<usize> {
        let mut sizes = vec![0; k];
        self.0.iter().for_each(|j| sizes[*j] += 1);
        sizes
    }
}

impl From<Vec<usize>> for Assignment {
    fn from(ids: Vec<usize>) -> Self {
        Self(ids)
    }
}

impl From<Assignment> for Vec<usize> {
    fn from(assignment: Assignment) -> Self {
        assignment.0
    }
}

impl KMeans<'_> {
    /// Cluster whose exemplar row is nearest to `x`. Earliest cluster wins ties.
    pub fn neighbor(&self, x: &[Feature], centroids: &Centroids) -> Result<usize> {
        nearest(x, centroids.iter().map(|i| self.matrix().row(i)))
    }

    /// Assign every row to its nearest exemplar.
    pub fn assign(&self, centroids: &Centroids) -> Result<Assignment> {
        self.matrix()
            .rows()
            .map(|x| self.neighbor(x, centroids))
            .collect::<Result<Vec<usize>>>()
            .map(Assignment::from)
    }
}
