//! Configuration file loading for derma-consult
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `CONSULT_*` (nested keys joined with `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./consult.toml` or `./.consult.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/derma-consult/config.toml`
//! 5. Default values

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    ConfigIssue, FileAnthropicConfig, FileConfig, FileConsultationConfig, FileOutputConfig,
    FileProvidersConfig, FileSpecialistConfig,
};
pub use loader::ConfigLoader;
