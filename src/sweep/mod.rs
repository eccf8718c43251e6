//! Orchestration of clustering runs over (k, feature set, day).
pub mod config;
pub use config::*;

pub mod sweep;
pub use sweep::*;
