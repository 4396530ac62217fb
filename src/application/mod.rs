pub mod config;
pub mod services;

pub use config::{ConfigOverrides, StatsConfig};
pub use services::StatsService;
