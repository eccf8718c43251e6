use super::*;
use crate::Energy;
use crate::Feature;
use crate::KMEANS_MAX_ITERATIONS;
use rand::Rng;

/// Exemplar k-means over a borrowed [`Matrix`].
///
/// Construction validates `k` against the matrix, so every later step can
/// rely on `1 <= k <= n`. The struct holds no mutable state: each run
/// threads its own [`Centroids`] through [`KMeans::step`].
#[derive(Debug, Clone, Copy)]
pub struct KMeans<'a> {
    matrix: &'a Matrix,
    k: usize,
    t: usize,
}

/// Outcome of a converged run.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// cluster id of each row, from the final pass
    pub assignment: Assignment,
    /// exemplar rows produced by the final pass
    pub centroids: Centroids,
    /// assign/recompute passes taken, including the final one
    pub iterations: usize,
}

impl<'a> KMeans<'a> {
    pub fn new(matrix: &'a Matrix, k: usize) -> Result<Self> {
        match k {
            0 => Err(ClusterError::InvalidK { k, n: matrix.n() }),
            k if k > matrix.n() => Err(ClusterError::InvalidK { k, n: matrix.n() }),
            k => Ok(Self {
                matrix,
                k,
                t: KMEANS_MAX_ITERATIONS,
            }),
        }
    }
    /// Override the iteration cap.
    pub fn capped(self, t: usize) -> Self {
        Self { t, ..self }
    }
    pub fn k(&self) -> usize {
        self.k
    }
    pub fn t(&self) -> usize {
        self.t
    }
    pub fn matrix(&self) -> &'a Matrix {
        self.matrix
    }

    /// Cluster from a random draw of `k` distinct exemplars.
    pub fn cluster<R: Rng>(&self, rng: &mut R) -> Result<Clustering> {
        let centroids = Centroids::random(self.matrix.n(), self.k, rng)?;
        self.converge(centroids)
    }

    /// Cluster from caller-chosen exemplars.
    pub fn cluster_from(&self, indices: Vec<usize>) -> Result<Clustering> {
        let centroids = Centroids::seeded(indices, self.k, self.matrix.n())?;
        self.converge(centroids)
    }

    /// One pass: assign every row, then recompute exemplars.
    pub fn step(&self, centroids: &Centroids) -> Result<(Assignment, Centroids)> {
        let assignment = self.assign(centroids)?;
        let centroids = self.recompute(&assignment)?;
        Ok((assignment, centroids))
    }

    /// Repeat passes until the set of exemplar rows is unchanged.
    fn converge(&self, mut centroids: Centroids) -> Result<Clustering> {
        for t in 1..=self.t {
            let (assignment, next) = self.step(&centroids)?;
            log::debug!("{:<32}{:<32}", format!("pass {:>4}", t), format!("{:?}", next.indices()));
            if next.same(&centroids) {
                return Ok(Clustering {
                    assignment,
                    centroids: next,
                    iterations: t,
                });
            }
            centroids = next;
        }
        Err(ClusterError::NonConvergence { iterations: self.t })
    }
}

/// Position of the candidate nearest to `x`.
///
/// Candidates are scanned in order and only a strictly smaller distance
/// displaces the incumbent, so ties resolve to the earliest candidate.
pub fn nearest<'b, I>(x: &[Feature], candidates: I) -> Result<usize>
where
    I: IntoIterator<Item = &'b [Feature]>,
{
    candidates
        .into_iter()
        .enumerate()
        .try_fold(None, |best: Option<(usize, Energy)>, (i, c)| {
            let d = distance(c, x)?;
            Ok(match best {
                Some((j, b)) if !(d < b) => Some((j, b)),
                _ => Some((i, d)),
            })
        })?
        .map(|(i, _)| i)
        .ok_or(ClusterError::NoCandidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn matrix(rows: &[&[Feature]]) -> Matrix {
        Matrix::try_from(rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
    }

    fn pairs() -> Matrix {
        matrix(&[&[0., 0.], &[0., 1.], &[10., 10.], &[10., 11.]])
    }

    /// well separated blobs of `per` rows around `k` far-apart centers
    fn blobs(k: usize, per: usize, seed: u64) -> Matrix {
        let ref mut rng = SmallRng::seed_from_u64(seed);
        Matrix::try_from(
            (0..k)
                .flat_map(|c| std::iter::repeat(c).take(per))
                .map(|c| {
                    vec![
                        100. * c as Feature + rng.random_range(-1.0..1.0),
                        -50. * c as Feature + rng.random_range(-1.0..1.0),
                    ]
                })
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    fn separates_pairs(a: &Assignment) {
        let ids = a.ids();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[2], ids[3]);
        assert_ne!(ids[0], ids[2]);
    }

    #[test]
    fn nearest_prefers_earliest_on_ties() {
        let candidates: [&[Feature]; 3] = [&[1., 0.], &[-1., 0.], &[0., 1.]];
        assert_eq!(nearest(&[0., 0.], candidates), Ok(0));
        let candidates: [&[Feature]; 2] = [&[5., 5.], &[-1., 0.]];
        assert_eq!(nearest(&[0., 0.], candidates), Ok(1));
        let candidates: [&[Feature]; 0] = [];
        assert_eq!(nearest(&[0., 0.], candidates), Err(ClusterError::NoCandidates));
    }

    #[test]
    fn invalid_k_fails_before_any_work() {
        let ref m = pairs();
        assert_eq!(KMeans::new(m, 0).err(), Some(ClusterError::InvalidK { k: 0, n: 4 }));
        assert_eq!(KMeans::new(m, 5).err(), Some(ClusterError::InvalidK { k: 5, n: 4 }));
    }

    #[test]
    fn pairs_separate_from_every_starting_pair() {
        let ref m = pairs();
        let km = KMeans::new(m, 2).unwrap();
        for a in 0..4 {
            for b in 0..4 {
                if a != b {
                    separates_pairs(&km.cluster_from(vec![a, b]).unwrap().assignment);
                }
            }
        }
    }

    #[test]
    fn pairs_separate_from_seeded_draws() {
        let ref m = pairs();
        let km = KMeans::new(m, 2).unwrap();
        for seed in 0..32 {
            let ref mut rng = SmallRng::seed_from_u64(seed);
            separates_pairs(&km.cluster(rng).unwrap().assignment);
        }
    }

    #[test]
    fn adjacent_start_needs_a_second_pass() {
        let ref m = pairs();
        let clustering = KMeans::new(m, 2).unwrap().cluster_from(vec![0, 1]).unwrap();
        assert_eq!(clustering.iterations, 2);
        assert_eq!(clustering.centroids.indices(), &[0, 2]);
    }

    #[test]
    fn singleton_clusters_when_k_equals_n() {
        let ref m = pairs();
        let ref mut rng = SmallRng::seed_from_u64(3);
        let clustering = KMeans::new(m, 4).unwrap().cluster(rng).unwrap();
        assert_eq!(clustering.iterations, 1);
        let ids = clustering.assignment.ids();
        for (i, j) in ids.iter().enumerate() {
            assert_eq!(clustering.centroids.row(*j), i);
        }
    }

    #[test]
    fn converged_centroids_are_a_fixed_point() {
        for seed in 0..16 {
            let ref m = blobs(4, 12, seed);
            let km = KMeans::new(m, 4).unwrap();
            let ref mut rng = SmallRng::seed_from_u64(seed);
            let clustering = km.cluster(rng).unwrap();
            let (_, again) = km.step(&clustering.centroids).unwrap();
            assert!(again.same(&clustering.centroids));
        }
    }

    #[test]
    fn terminates_within_n_squared_passes() {
        for seed in 0..16 {
            let ref m = blobs(3, 10, seed);
            let n = m.n();
            let km = KMeans::new(m, 3).unwrap().capped(n * n);
            let ref mut rng = SmallRng::seed_from_u64(seed);
            let clustering = km.cluster(rng).unwrap();
            assert!(clustering.iterations <= n * n);
            assert!(clustering.assignment.ids().iter().all(|j| *j < 3));
        }
    }

    #[test]
    fn exhausted_cap_is_non_convergence() {
        let ref m = pairs();
        let km = KMeans::new(m, 2).unwrap().capped(1);
        assert_eq!(
            km.cluster_from(vec![0, 1]),
            Err(ClusterError::NonConvergence { iterations: 1 })
        );
    }

    #[test]
    fn explicit_centroids_are_validated() {
        let ref m = pairs();
        let km = KMeans::new(m, 2).unwrap();
        assert!(matches!(
            km.cluster_from(vec![1, 1]),
            Err(ClusterError::InvalidCentroids { .. })
        ));
    }
}
