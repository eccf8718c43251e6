use crate::Feature;

/// Running per-cluster sums and counts, folded down to mean vectors.
///
/// Lives only for the duration of one recomputation.
#[derive(Debug, Clone)]
pub struct Accumulator {
    sums: Vec<Vec<Feature>>,
    counts: Vec<usize>,
}

impl Accumulator {
    pub fn new(k: usize, width: usize) -> Self {
        Self {
            sums: vec![vec![0.; width]; k],
            counts: vec![0; k],
        }
    }

    /// Add a row into the running sum of cluster j.
    pub fn absorb(&mut self, j: usize, row: &[Feature]) {
        self.counts[j] += 1;
        self.sums[j]
            .iter_mut()
            .zip(row.iter())
            .for_each(|(sum, x)| *sum += x);
    }

    pub fn count(&self, j: usize) -> usize {
        self.counts[j]
    }

    /// Clusters that absorbed nothing.
    pub fn empties(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, n)| **n == 0)
            .map(|(j, _)| j)
    }

    /// Per-cluster means. Empty clusters keep their all-zero sum.
    pub fn means(self) -> Vec<Vec<Feature>> {
        self.sums
            .into_iter()
            .zip(self.counts)
            .map(|(sum, n)| match n {
                0 => sum,
                n => sum.into_iter().map(|x| x / n as Feature).collect(),
            })
            .collect()
    }
}
