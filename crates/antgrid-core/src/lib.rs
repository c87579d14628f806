pub mod config;
pub mod error;
pub mod types;

pub use config::{ColonyConfig, ResultSelection};
pub use error::ConfigError;
pub use types::*;
