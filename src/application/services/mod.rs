pub mod stats;

pub use stats::{StatsService, compute_stats};
