use super::*;
use crate::Feature;

impl KMeans<'_> {
    /// Row nearest to `x`. Earliest row wins ties.
    pub fn closest(&self, x: &[Feature]) -> Result<usize> {
        nearest(x, self.matrix().rows())
    }

    /// Average each cluster, then snap each average onto its closest row.
    ///
    /// An empty cluster keeps an all-zero mean and therefore snaps onto the
    /// row nearest the origin. The result may repeat rows.
    ///
    /// The assignment must cover every row with an id below k.
    pub fn recompute(&self, assignment: &Assignment) -> Result<Centroids> {
        if assignment.n() != self.matrix().n() {
            return Err(ClusterError::AssignmentLength {
                len: assignment.n(),
                n: self.matrix().n(),
            });
        }
        if let Some((row, &id)) = assignment
            .ids()
            .iter()
            .enumerate()
            .find(|(_, j)| **j >= self.k())
        {
            return Err(ClusterError::InvalidCluster {
                row,
                id,
                k: self.k(),
            });
        }
        let mut accumulator = Accumulator::new(self.k(), self.matrix().width());
        self.matrix()
            .rows()
            .zip(assignment.ids())
            .for_each(|(x, j)| accumulator.absorb(*j, x));
        accumulator
            .empties()
            .for_each(|j| log::debug!("{:<32}{:<32}", "empty cluster", j));
        accumulator
            .means()
            .iter()
            .map(|mean| self.closest(mean))
            .collect::<Result<Vec<usize>>>()
            .map(Centroids::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn means_snap_to_nearest_rows() {
        let ref m = Matrix::try_from(vec![
            vec![0., 0.],
            vec![0., 1.],
            vec![10., 10.],
            vec![10., 11.],
        ])
        .unwrap();
        let km = KMeans::new(m, 2).unwrap();
        let c = km.recompute(&Assignment::from(vec![0, 1, 1, 1])).unwrap();
        assert_eq!(c.indices(), &[0, 2]);
    }

    #[test]
    fn midpoint_ties_snap_to_earliest_row() {
        let ref m = Matrix::try_from(vec![vec![0., 0.], vec![0., 1.]]).unwrap();
        let km = KMeans::new(m, 1).unwrap();
        let c = km.recompute(&Assignment::from(vec![0, 0])).unwrap();
        assert_eq!(c.indices(), &[0]);
    }

    #[test]
    fn short_assignments_are_rejected() {
        let ref m = Matrix::try_from(vec![vec![0.], vec![1.], vec![2.]]).unwrap();
        let km = KMeans::new(m, 2).unwrap();
        assert_eq!(
            km.recompute(&Assignment::from(vec![0])),
            Err(ClusterError::AssignmentLength { len: 1, n: 3 })
        );
        assert_eq!(
            km.recompute(&Assignment::from(vec![0, 1, 1, 0])),
            Err(ClusterError::AssignmentLength { len: 4, n: 3 })
        );
    }

    #[test]
    fn cluster_ids_beyond_k_are_rejected() {
        let ref m = Matrix::try_from(vec![vec![0.], vec![1.], vec![2.]]).unwrap();
        let km = KMeans::new(m, 2).unwrap();
        assert_eq!(
            km.recompute(&Assignment::from(vec![0, 1, 7])),
            Err(ClusterError::InvalidCluster { row: 2, id: 7, k: 2 })
        );
        assert_eq!(
            km.recompute(&Assignment::from(vec![2, 0, 1])),
            Err(ClusterError::InvalidCluster { row: 0, id: 2, k: 2 })
        );
    }

    #[test]
    fn empty_cluster_snaps_to_row_nearest_origin() {
        // cluster 1 never wins: its exemplar duplicates row 0, which claims ties
        let ref m = Matrix::try_from(vec![vec![5., 5.], vec![5., 5.], vec![9., 9.], vec![1., 2.]])
            .unwrap();
        let km = KMeans::new(m, 3).unwrap();
        let ref a = km.assign(&Centroids::from(vec![0, 1, 2])).unwrap();
        assert_eq!(a.sizes(3)[1], 0);
        let c = km.recompute(a).unwrap();
        assert_eq!(c.k(), 3);
        assert_eq!(c.row(1), 3);
    }
}
