//! Harness configuration loading.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults of [`HarnessConfig`]
//! 2. An optional TOML/JSON/YAML file (`petstore-contract.toml` by default,
//!    overridable through `PETSTORE_CONTRACT_CONFIG`)
//! 3. `PETSTORE_CONTRACT_*` environment variables, e.g.
//!    `PETSTORE_CONTRACT_BASE_URL` or `PETSTORE_CONTRACT_OPERATIONS=PlaceOrder,GetOrderById`

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use petstore_contract_domain::{DomainError, HarnessConfig};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "PETSTORE_CONTRACT_CONFIG";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "PETSTORE_CONTRACT";

/// Configuration file used when `PETSTORE_CONTRACT_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "petstore-contract.toml";

/// Errors raised while loading the harness configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// The loaded values are not usable.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}

/// Loads the configuration from the default file location and the process
/// environment.
///
/// # Errors
///
/// Returns an error if a source is malformed or the result fails validation.
pub fn load_config() -> Result<HarnessConfig, SettingsError> {
    let (path, required) = std::env::var(CONFIG_PATH_ENV).map_or_else(
        |_| (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |path| (PathBuf::from(path), true),
    );
    load_config_with(Some((&path, required)), environment())
}

/// Loads the configuration from explicit sources.
///
/// `file` is the path and whether it must exist. `env` is usually
/// [`environment`]; tests pass one with a fixed source map.
///
/// # Errors
///
/// Returns an error if a source is malformed or the result fails validation.
pub fn load_config_with(
    file: Option<(&Path, bool)>,
    env: Environment,
) -> Result<HarnessConfig, SettingsError> {
    let mut builder = Config::builder();
    if let Some((path, required)) = file {
        debug!(path = %path.display(), required, "reading configuration file");
        builder = builder.add_source(File::from(path).required(required));
    }

    let config: HarnessConfig = builder.add_source(env).build()?.try_deserialize()?;

    config.parse_base_url()?;
    config.selected_operations()?;
    Ok(config)
}

/// Environment source reading `PETSTORE_CONTRACT_*` variables.
#[must_use]
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("operations")
}
