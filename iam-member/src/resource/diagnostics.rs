//! Diagnostics returned to the host from lifecycle operations.

use serde::Serialize;
use service_core::error::AppError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Attribute the diagnostic refers to, when it is about one input field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl From<AppError> for Diagnostics {
    fn from(err: AppError) -> Self {
        match err {
            AppError::ValidationError(errors) => {
                let mut diagnostics = Diagnostics::new();
                let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
                fields.sort_by(|a, b| a.0.cmp(&b.0));
                for (field, field_errors) in fields {
                    for error in field_errors {
                        let detail = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| error.code.to_string());
                        diagnostics.push(
                            Diagnostic::error(format!("invalid value for \"{}\"", field))
                                .with_detail(detail)
                                .with_attribute(field.to_string()),
                        );
                    }
                }
                diagnostics
            }
            other => Diagnostic::error(other.kind())
                .with_detail(other.to_string())
                .into(),
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match &d.attribute {
                Some(attr) => write!(f, "{:?}: {} ({})", d.severity, d.summary, attr)?,
                None => write!(f, "{:?}: {}", d.severity, d.summary)?,
            }
            if let Some(detail) = &d.detail {
                write!(f, ": {}", detail)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IamMember;

    #[test]
    fn test_validation_error_points_at_attribute() {
        let err = IamMember::new("/a b", "roles/x", "user: a").unwrap_err();
        let diagnostics = Diagnostics::from(err);

        let attributes: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| d.attribute.as_deref())
            .collect();
        assert_eq!(attributes, vec!["member", "resource"]);
        assert!(diagnostics.has_error());
        assert!(
            diagnostics
                .iter()
                .all(|d| d.detail.as_deref() == Some("contains whitespace"))
        );
    }

    #[test]
    fn test_store_error_is_kept_verbatim() {
        let err = AppError::Forbidden(anyhow::anyhow!("caller lacks iam.setPolicy"));
        let diagnostics = Diagnostics::from(err);

        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.summary, "Forbidden");
        assert_eq!(
            diagnostic.detail.as_deref(),
            Some("Forbidden: caller lacks iam.setPolicy")
        );
        assert!(diagnostic.attribute.is_none());
    }

    #[test]
    fn test_rejected_write_carries_server_error_details() {
        use service_core::tonic::{Code, Status};
        use service_core::tonic_types::{ErrorDetails, StatusExt};

        let status = Status::with_error_details(
            Code::InvalidArgument,
            "invalid policy",
            ErrorDetails::with_bad_request_violation(
                "policy.bindings[1].members[0]",
                "unknown member type",
            ),
        );
        let diagnostics = Diagnostics::from(AppError::from(status));

        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.summary, "Bad request");
        let detail = diagnostic.detail.as_deref().unwrap();
        assert!(detail.starts_with("Bad request: invalid policy\n"), "detail was {detail}");
        assert!(detail.contains("policy.bindings[1].members[0]"), "detail was {detail}");
        assert!(detail.contains("unknown member type"), "detail was {detail}");
    }

    #[test]
    fn test_serializes_without_empty_fields() {
        let diagnostics = Diagnostics::from(Diagnostic::error("boom"));
        let json = serde_json::to_value(&diagnostics).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "severity": "error", "summary": "boom" }])
        );
    }
}
