//! Exemplar k-means: centroids are always real rows of the data matrix.
//!
//! Each pass assigns every row to its nearest exemplar, averages each cluster,
//! then snaps every average back onto the nearest real row. The loop stops once
//! the set of exemplar rows stops changing.
pub mod accumulator;
pub use accumulator::*;

pub mod assignment;
pub use assignment::*;

pub mod centroids;
pub use centroids::*;

pub mod distance;
pub use distance::*;

pub mod error;
pub use error::*;

pub mod initializer;
pub use initializer::*;

pub mod kmeans;
pub use kmeans::*;

pub mod matrix;
pub use matrix::*;

pub mod recompute;
pub use recompute::*;
