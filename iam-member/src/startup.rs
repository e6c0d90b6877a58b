//! Provider construction.

use service_core::grpc::IamClient;
use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::resource::{Diagnostics, MemberResource};
use crate::services::{PolicyStore, PolicyUpdater};

/// A configured provider instance. Owns the lock registry through its
/// [`PolicyUpdater`]; build one per process.
#[derive(Clone)]
pub struct Provider {
    updater: Arc<PolicyUpdater>,
    members: MemberResource,
}

impl Provider {
    /// Connect to the IAM policy service described by `config`.
    ///
    /// Expects tracing to be initialized already.
    pub async fn build(config: &ProviderConfig) -> Result<Self, Diagnostics> {
        if config.insecure {
            tracing::warn!(address = %config.address, "TLS disabled for IAM policy service connection");
        }

        let client = IamClient::new(config.client_config()).await.map_err(|e| {
            tracing::error!(error = %e, address = %config.address, "Failed to connect to IAM policy service");
            Diagnostics::from(e)
        })?;

        tracing::info!(
            address = %config.address,
            insecure = config.insecure,
            "Provider configured"
        );
        Ok(Self::with_store(Arc::new(client)))
    }

    /// Build a provider over any policy store.
    pub fn with_store(store: Arc<dyn PolicyStore>) -> Self {
        let updater = Arc::new(PolicyUpdater::new(store));
        Self {
            members: MemberResource::new(Arc::clone(&updater)),
            updater,
        }
    }

    pub fn members(&self) -> &MemberResource {
        &self.members
    }

    pub fn updater(&self) -> &PolicyUpdater {
        &self.updater
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;
    use service_core::config::LogConfig;
    use std::io;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_build_warns_when_tls_is_disabled() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        let config = ProviderConfig {
            log: LogConfig::default(),
            address: "127.0.0.1:1".to_string(),
            token: Secret::new("s3cr3t-value".to_string()),
            insecure: true,
            connect_timeout_secs: 1,
            request_timeout_secs: 1,
        };
        let _ = Provider::build(&config).await;

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(
            output.contains("TLS disabled for IAM policy service connection"),
            "logs were {output}"
        );
    }
}
