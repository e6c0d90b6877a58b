use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Logging block shared by every service configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load a configuration of type `T`.
///
/// Sources, lowest precedence first: `.env` (into the process environment),
/// an optional `configuration.{toml,yaml,json}` file in the working directory,
/// then `<PREFIX>_<KEY>` environment variables (`__` separates nested keys).
pub fn load<T: DeserializeOwned>(prefix: &str) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let config = Cfg::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
