//! CSV tables of labelled rows and the per-day files derived from them.
pub mod day;
pub use day::*;

pub mod error;
pub use error::*;

pub mod preprocess;
pub use preprocess::*;

pub mod table;
pub use table::*;
