//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    /// Cookie domain; cookies are host-only when unset.
    #[serde(default)]
    pub domain: Option<String>,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Signing/encryption key material for cookies, at least 64 bytes.
    pub secret: String,
}

impl ServerConfig {
    /// Loads `config/default.yaml`, the optional `config/{APP_ENV}.yaml`
    /// profile (defaults to `local`) and `APP_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
        Self::load_from("config", &app_env)
    }

    /// Same as [`ServerConfig::load`] but reads profiles from `dir`.
    pub fn load_from(dir: &str, app_env: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(&format!("{dir}/default")))
            .add_source(File::with_name(&format!("{dir}/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
