//! gRPC client interceptors.
//!
//! Every outgoing call to the IAM policy service carries:
//! - the bearer token in the `authorization` metadata
//! - the W3C trace context of the current span (traceparent/tracestate)

use opentelemetry::trace::TraceContextExt;
use secrecy::{ExposeSecret, Secret};
use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::error::AppError;

/// gRPC metadata key for the bearer credential.
pub const AUTHORIZATION_KEY: &str = "authorization";

/// gRPC metadata key for W3C traceparent header.
pub const TRACEPARENT_KEY: &str = "traceparent";

/// gRPC metadata key for W3C tracestate header.
pub const TRACESTATE_KEY: &str = "tracestate";

/// Interceptor that attaches `authorization: Bearer <token>` and the current
/// trace context to each request.
#[derive(Clone)]
pub struct BearerTokenInterceptor {
    authorization: MetadataValue<Ascii>,
}

impl BearerTokenInterceptor {
    pub fn new(token: &Secret<String>) -> Result<Self, AppError> {
        let authorization: MetadataValue<Ascii> = format!("Bearer {}", token.expose_secret())
            .parse()
            .map_err(|_| {
                AppError::ConfigError(anyhow::anyhow!(
                    "token contains characters not allowed in gRPC metadata"
                ))
            })?;
        Ok(Self { authorization })
    }
}

impl Interceptor for BearerTokenInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert(AUTHORIZATION_KEY, self.authorization.clone());
        inject_trace_context(&mut request);
        Ok(request)
    }
}

/// Inject current trace context into outgoing gRPC request metadata.
pub fn inject_trace_context<T>(request: &mut Request<T>) {
    let span = Span::current();
    let context = span.context();
    let otel_span = context.span();
    let span_context = otel_span.span_context();

    if span_context.is_valid() {
        // Format: version-trace_id-span_id-trace_flags
        let traceparent = format!(
            "00-{}-{}-{:02x}",
            span_context.trace_id(),
            span_context.span_id(),
            span_context.trace_flags().to_u8()
        );

        if let Ok(value) = traceparent.parse() {
            request.metadata_mut().insert(TRACEPARENT_KEY, value);
        }

        let tracestate_str = span_context.trace_state().header();
        if !tracestate_str.is_empty()
            && let Ok(value) = tracestate_str.parse()
        {
            request.metadata_mut().insert(TRACESTATE_KEY, value);
        }
    }
}
