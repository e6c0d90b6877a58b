//! Conversion from `tonic::Status` returned by upstream services into `AppError`.
//!
//! | gRPC Status | AppError |
//! |-------------|----------|
//! | `INVALID_ARGUMENT`, `FAILED_PRECONDITION`, `OUT_OF_RANGE` | `BadRequest` |
//! | `NOT_FOUND` | `NotFound` |
//! | `UNAUTHENTICATED` | `Unauthorized` |
//! | `PERMISSION_DENIED` | `Forbidden` |
//! | `ALREADY_EXISTS` | `Conflict` |
//! | `RESOURCE_EXHAUSTED` | `TooManyRequests` |
//! | `UNAVAILABLE` | `ServiceUnavailable` |
//! | anything else | `InternalError`, prefixed with the status code |
//!
//! The upstream message is carried over unchanged in every case. Rich error
//! details (`google.rpc.Status.details`) are appended one per line.

use tonic::{Code, Status};
use tonic_types::StatusExt;

use crate::error::AppError;

/// Status message followed by every attached error detail.
pub fn describe_status(status: &Status) -> String {
    let mut text = status.message().to_string();
    if status.details().is_empty() {
        return text;
    }

    match status.check_error_details_vec() {
        Ok(details) if !details.is_empty() => {
            for detail in details {
                text.push_str(&format!("\n{:?}", detail));
            }
        }
        _ => text.push_str(&format!(
            "\n({} bytes of error details that could not be decoded)",
            status.details().len()
        )),
    }
    text
}

impl From<Status> for AppError {
    fn from(status: Status) -> Self {
        let message = describe_status(&status);
        match status.code() {
            Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => {
                AppError::BadRequest(anyhow::anyhow!("{}", message))
            }
            Code::NotFound => AppError::NotFound(anyhow::anyhow!("{}", message)),
            Code::Unauthenticated => AppError::Unauthorized(anyhow::anyhow!("{}", message)),
            Code::PermissionDenied => AppError::Forbidden(anyhow::anyhow!("{}", message)),
            Code::AlreadyExists => AppError::Conflict(anyhow::anyhow!("{}", message)),
            Code::ResourceExhausted => {
                let retry_after = status
                    .metadata()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse().ok());
                AppError::TooManyRequests(message, retry_after)
            }
            Code::Unavailable => AppError::ServiceUnavailable(message),
            Code::Ok => AppError::InternalError(anyhow::anyhow!("Unexpected OK status as error")),
            code => AppError::InternalError(anyhow::anyhow!("{:?}: {}", code, message)),
        }
    }
}
