use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config::{self as core_config, LogConfig};
use service_core::error::AppError;
use service_core::grpc::IamClientConfig;
use std::time::Duration;

/// Environment prefix: `IAM_GO_ADDRESS`, `IAM_GO_TOKEN`, `IAM_GO_INSECURE`, ...
pub const ENV_PREFIX: &str = "IAM_GO";

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(flatten)]
    pub log: LogConfig,
    /// Address of the IAM policy service (`host` or `host:port`).
    pub address: String,
    /// Bearer token used for every call.
    pub token: Secret<String>,
    /// Use a plaintext connection.
    #[serde(default)]
    pub insecure: bool,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let config: ProviderConfig = core_config::load(ENV_PREFIX)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.address.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "IAM_GO_ADDRESS must not be empty"
            )));
        }

        if self.token.expose_secret().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "IAM_GO_TOKEN must not be empty"
            )));
        }

        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "IAM_GO_CONNECT_TIMEOUT_SECS and IAM_GO_REQUEST_TIMEOUT_SECS must be positive"
            )));
        }

        Ok(())
    }

    pub fn client_config(&self) -> IamClientConfig {
        IamClientConfig {
            address: self.address.clone(),
            token: self.token.clone(),
            insecure: self.insecure,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
