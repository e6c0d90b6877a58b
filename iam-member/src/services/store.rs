//! Policy store abstraction over the remote IAM policy service.

use async_trait::async_trait;
use service_core::error::AppError;
use service_core::grpc::{IamClient, Policy};

/// Full-document get/replace access to resource policies.
///
/// Implementations surface remote failures unchanged and do not retry.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// Fetch the current policy of `resource`.
    async fn get_policy(&self, resource: &str) -> Result<Policy, AppError>;

    /// Replace the policy of `resource`, returning the stored document.
    async fn set_policy(&self, resource: &str, policy: Policy) -> Result<Policy, AppError>;
}

#[async_trait]
impl PolicyStore for IamClient {
    async fn get_policy(&self, resource: &str) -> Result<Policy, AppError> {
        self.get_iam_policy(resource).await.map_err(|status| {
            tracing::warn!(
                resource = %resource,
                code = ?status.code(),
                error = %status.message(),
                "GetIamPolicy failed"
            );
            AppError::from(status)
        })
    }

    async fn set_policy(&self, resource: &str, policy: Policy) -> Result<Policy, AppError> {
        self.set_iam_policy(resource, policy).await.map_err(|status| {
            tracing::warn!(
                resource = %resource,
                code = ?status.code(),
                error = %status.message(),
                "SetIamPolicy failed"
            );
            AppError::from(status)
        })
    }
}
