//! Application configuration module.
//!
//! Manages the TOML config file for catalog, generation, chart, bot and
//! planning settings. Credentials are read from the environment instead.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
