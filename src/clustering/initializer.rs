use super::*;
use rand::Rng;

impl Centroids {
    /// Draw `k` distinct rows uniformly from `0..n`.
    ///
    /// Each slot is redrawn until it misses every row already chosen, which
    /// samples uniformly over ordered tuples of distinct rows. The source of
    /// randomness is supplied by the caller so runs are reproducible.
    pub fn random<R: Rng>(n: usize, k: usize, rng: &mut R) -> Result<Self> {
        if k == 0 || k > n {
            return Err(ClusterError::InvalidK { k, n });
        }
        let mut indices = Vec::with_capacity(k);
        while indices.len() < k {
            let i = rng.random_range(0..n);
            if !indices.contains(&i) {
                indices.push(i);
            }
        }
        Ok(Self::from(indices))
    }
}
