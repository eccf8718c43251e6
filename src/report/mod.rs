//! Similarity tallies and the CSV reports written for each run.
pub mod reporter;
pub use reporter::*;

pub mod tally;
pub use tally::*;
