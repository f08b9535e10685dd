//! Layered configuration
//!
//! Sources, lowest precedence first: built-in defaults, `bindmeta.toml` in
//! the working directory (or the file given with `--config`), `BINDMETA_*`
//! environment variables, then command-line flags.

use bindmeta_codegen::GeneratorOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "bindmeta";
pub const ENV_PREFIX: &str = "BINDMETA";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    pub generator: GeneratorOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            generator: GeneratorOptions::default(),
        }
    }
}

impl Settings {
    /// Load settings from every source except command-line flags
    ///
    /// Nested keys use `__` in environment variables, e.g.
    /// `BINDMETA_GENERATOR__PARALLEL=false`.
    pub fn load(config_file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        builder.build()?.try_deserialize()
    }
}
