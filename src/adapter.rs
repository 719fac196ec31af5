pub mod config;
pub mod driven;
pub mod driver;

pub use config::{AppConfig, ConfigError};
