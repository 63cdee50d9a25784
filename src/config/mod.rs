// * Runtime configuration: documented defaults and validated LSH parameters

pub mod constants;
pub mod params;

pub use params::{BandingPolicy, ConfigError, LshConfig, ShingleStrategy};
