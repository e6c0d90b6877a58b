//! service-core: Shared infrastructure for the IAM member provider.
pub mod config;
pub mod error;
pub mod grpc;
pub mod observability;

pub use prost;
pub use secrecy;
pub use serde;
pub use tokio;
pub use tonic;
pub use tonic_types;
pub use tracing;
pub use validator;
