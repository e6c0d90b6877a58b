//! IAM policy service gRPC client.

use secrecy::Secret;
use std::time::Duration;
use tonic::Request;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

use super::interceptors::BearerTokenInterceptor;
use super::proto::iam::iam_policy_client::IamPolicyClient;
use super::proto::iam::{GetIamPolicyRequest, Policy, SetIamPolicyRequest};
use crate::error::AppError;

/// Port assumed when the configured address does not name one.
pub const DEFAULT_TLS_PORT: u16 = 443;

/// Configuration for the IAM policy client.
#[derive(Clone, Debug)]
pub struct IamClientConfig {
    /// Host or `host:port` of the IAM service, optionally with a scheme.
    pub address: String,
    /// Bearer token sent with every call.
    pub token: Secret<String>,
    /// Use a plaintext channel instead of TLS.
    pub insecure: bool,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Request timeout.
    pub request_timeout: Duration,
}

impl IamClientConfig {
    /// Full endpoint URI derived from `address` and `insecure`.
    pub fn endpoint_uri(&self) -> String {
        if self.address.contains("://") {
            return self.address.clone();
        }
        let scheme = if self.insecure { "http" } else { "https" };
        format!(
            "{}://{}",
            scheme,
            with_default_port(&self.address, DEFAULT_TLS_PORT)
        )
    }
}

/// Append `:port` to `target` unless it already carries one.
///
/// IPv6 literals may be given bracketed (`[::1]`, `[::1]:8443`) or bare
/// (`::1`); a bare literal never carries a port and is bracketed here.
pub fn with_default_port(target: &str, port: u16) -> String {
    if let Some(rest) = target.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((_, suffix)) if suffix.starts_with(':') => target.to_string(),
            _ => format!("{}:{}", target, port),
        };
    }
    match target.matches(':').count() {
        0 => format!("{}:{}", target, port),
        1 => target.to_string(),
        _ => format!("[{}]:{}", target, port),
    }
}

type AuthenticatedChannel = InterceptedService<Channel, BearerTokenInterceptor>;

/// IAM policy client. Clones share the underlying channel.
#[derive(Clone)]
pub struct IamClient {
    client: IamPolicyClient<AuthenticatedChannel>,
}

impl IamClient {
    /// Connect to the IAM service with the given configuration.
    pub async fn new(config: IamClientConfig) -> Result<Self, AppError> {
        let interceptor = BearerTokenInterceptor::new(&config.token)?;

        let mut endpoint = Endpoint::from_shared(config.endpoint_uri())?
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout);
        if !config.insecure {
            endpoint = endpoint.tls_config(ClientTlsConfig::new().with_native_roots())?;
        }

        let channel = endpoint.connect().await?;
        tracing::debug!(
            endpoint = %config.endpoint_uri(),
            insecure = config.insecure,
            "Connected to IAM policy service"
        );

        Ok(Self {
            client: IamPolicyClient::new(InterceptedService::new(channel, interceptor)),
        })
    }

    /// Fetch the current policy of `resource`.
    pub async fn get_iam_policy(&self, resource: &str) -> Result<Policy, tonic::Status> {
        let request = Request::new(GetIamPolicyRequest {
            resource: resource.to_string(),
            options: None,
        });
        let response = self.client.clone().get_iam_policy(request).await?;
        Ok(response.into_inner())
    }

    /// Replace the policy of `resource` with `policy`.
    pub async fn set_iam_policy(
        &self,
        resource: &str,
        policy: Policy,
    ) -> Result<Policy, tonic::Status> {
        let request = Request::new(SetIamPolicyRequest {
            resource: resource.to_string(),
            policy: Some(policy),
        });
        let response = self.client.clone().set_iam_policy(request).await?;
        Ok(response.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(address: &str, insecure: bool) -> IamClientConfig {
        IamClientConfig {
            address: address.to_string(),
            token: Secret::new("token".to_string()),
            insecure,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_with_default_port() {
        assert_eq!(with_default_port("iam.example.com", 443), "iam.example.com:443");
        assert_eq!(with_default_port("iam.example.com:8443", 443), "iam.example.com:8443");
    }

    #[test]
    fn test_with_default_port_ipv6() {
        assert_eq!(with_default_port("[::1]", 443), "[::1]:443");
        assert_eq!(with_default_port("[::1]:8443", 443), "[::1]:8443");
        assert_eq!(with_default_port("2001:db8::1", 443), "[2001:db8::1]:443");
        assert_eq!(
            config("[::1]", true).endpoint_uri(),
            "http://[::1]:443"
        );
    }

    #[test]
    fn test_endpoint_uri_uses_tls_by_default() {
        assert_eq!(
            config("iam.example.com", false).endpoint_uri(),
            "https://iam.example.com:443"
        );
    }

    #[test]
    fn test_endpoint_uri_insecure() {
        assert_eq!(
            config("localhost:50051", true).endpoint_uri(),
            "http://localhost:50051"
        );
    }

    #[test]
    fn test_endpoint_uri_keeps_explicit_scheme() {
        assert_eq!(
            config("http://iam:9000", false).endpoint_uri(),
            "http://iam:9000"
        );
    }
}
