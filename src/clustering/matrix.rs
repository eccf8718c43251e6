use super::*;
use crate::Arbitrary;
use crate::Feature;

/// Rectangular, read-only table of feature rows.
///
/// Every row has the same width and there is at least one row of width at
/// least one. Rows are addressed by their position, which is also how
/// [`Centroids`] and [`Assignment`] refer to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    width: usize,
    rows: Vec<Vec<Feature>>,
}

impl Matrix {
    /// number of rows
    pub fn n(&self) -> usize {
        self.rows.len()
    }
    /// number of features per row
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn row(&self, i: usize) -> &[Feature] {
        &self.rows[i]
    }
    pub fn rows(&self) -> impl Iterator<Item = &[Feature]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl TryFrom<Vec<Vec<Feature>>> for Matrix {
    type Error = ClusterError;
    fn try_from(rows: Vec<Vec<Feature>>) -> Result<Self> {
        let width = rows
            .first()
            .map(Vec::len)
            .ok_or(ClusterError::EmptyMatrix)?;
        if width == 0 {
            return Err(ClusterError::Featureless);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ClusterError::Ragged {
                row,
                width: r.len(),
                expected: width,
            });
        }
        Ok(Self { width, rows })
    }
}

impl Arbitrary for Matrix {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        let n = rng.random_range(16..64);
        let width = rng.random_range(1..5);
        Self {
            width,
            rows: (0..n)
                .map(|_| (0..width).map(|_| rng.random_range(-100.0..100.0)).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangular_rows_are_accepted() {
        let m = Matrix::try_from(vec![vec![0., 1.], vec![2., 3.], vec![4., 5.]]).unwrap();
        assert_eq!(m.n(), 3);
        assert_eq!(m.width(), 2);
        assert_eq!(m.row(1), &[2., 3.]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let m = Matrix::try_from(vec![vec![0., 1.], vec![2.]]);
        assert_eq!(
            m,
            Err(ClusterError::Ragged {
                row: 1,
                width: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn empty_tables_are_rejected() {
        assert_eq!(Matrix::try_from(Vec::<Vec<Feature>>::new()), Err(ClusterError::EmptyMatrix));
        assert_eq!(
            Matrix::try_from(vec![vec![], vec![]]),
            Err(ClusterError::Featureless)
        );
    }

    #[test]
    fn arbitrary_matrices_are_rectangular() {
        let m = Matrix::random();
        assert!(m.n() >= 16);
        assert!(m.rows().all(|r| r.len() == m.width()));
    }
}
