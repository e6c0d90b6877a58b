//! Lifecycle of one `(resource, role, member)` binding as seen by the host.

use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::sync::Arc;

use super::diagnostics::{Diagnostic, Diagnostics};
use crate::models::IamMember;
use crate::services::PolicyUpdater;

/// Desired state supplied by the host on create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MemberArgs {
    pub resource: String,
    pub role: String,
    pub member: String,
}

/// State recorded by the host for an existing binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberState {
    pub id: String,
    pub resource: String,
    pub role: String,
    pub member: String,
}

impl From<&IamMember> for MemberState {
    fn from(member: &IamMember) -> Self {
        Self {
            id: member.id(),
            resource: member.resource().to_string(),
            role: member.role().to_string(),
            member: member.member().to_string(),
        }
    }
}

/// Create/read/delete/import operations for member bindings.
///
/// Every change is delegated to a shared [`PolicyUpdater`], so all members on
/// one resource are serialized through the same lock.
#[derive(Clone)]
pub struct MemberResource {
    updater: Arc<PolicyUpdater>,
}

impl MemberResource {
    pub fn new(updater: Arc<PolicyUpdater>) -> Self {
        Self { updater }
    }

    /// Add the binding and return its recorded state.
    ///
    /// Input is validated before any lock or remote call. After the write,
    /// the binding is read back from the store.
    pub async fn create(&self, args: &MemberArgs) -> Result<MemberState, Diagnostics> {
        let member = IamMember::new(&args.resource, &args.role, &args.member)?;

        self.updater.bind(&member).await?;

        self.read(&member.id()).await?.ok_or_else(|| {
            Diagnostics::from(
                Diagnostic::error("binding not found after create").with_detail(format!(
                    "{} was written to {} but is not present in its policy",
                    member.id(),
                    member.resource()
                )),
            )
        })
    }

    /// Current state for `id`, or `None` when the binding no longer exists.
    pub async fn read(&self, id: &str) -> Result<Option<MemberState>, Diagnostics> {
        let member: IamMember = id.parse()?;

        if self.updater.lookup(&member).await? {
            Ok(Some(MemberState::from(&member)))
        } else {
            tracing::info!(id = %id, "Binding no longer present; treating as removed");
            Ok(None)
        }
    }

    /// Remove the binding identified by `id`.
    pub async fn delete(&self, id: &str) -> Result<(), Diagnostics> {
        let member: IamMember = id.parse()?;
        self.updater.unbind(&member).await?;
        Ok(())
    }

    /// Adopt an existing binding by its identity token.
    pub async fn import(&self, id: &str) -> Result<MemberState, Diagnostics> {
        self.read(id).await?.ok_or_else(|| {
            Diagnostics::from(AppError::NotFound(anyhow::anyhow!(
                "cannot import non-existent binding \"{}\"",
                id
            )))
        })
    }
}
