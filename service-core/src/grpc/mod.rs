//! gRPC utilities for talking to the IAM policy service.
//!
//! This module provides:
//! - Message and client definitions for `google.iam.v1.IAMPolicy`
//! - Error conversion from `tonic::Status` into `AppError`
//! - Client interceptors for bearer credentials and trace context propagation
//! - The IAM policy client used as the policy store transport

pub mod error;
pub mod iam_client;
pub mod interceptors;
pub mod proto;

pub use iam_client::{DEFAULT_TLS_PORT, IamClient, IamClientConfig, with_default_port};
pub use interceptors::{BearerTokenInterceptor, inject_trace_context};
pub use proto::iam::{AuditConfig, AuditLogConfig, Binding, Policy};
pub use proto::r#type::Expr;
