use super::*;
use crate::Energy;
use crate::Feature;

/// Euclidean distance between two feature vectors of equal width.
pub fn distance(a: &[Feature], b: &[Feature]) -> Result<Energy> {
    if a.len() != b.len() {
        return Err(ClusterError::InvalidDimension {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| x - y)
        .map(|d| d * d)
        .sum::<Energy>()
        .sqrt())
}
