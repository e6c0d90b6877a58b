//! Binding transactions: fetch, edit, and write back a resource policy while
//! holding that resource's lock.

use service_core::error::AppError;
use service_core::grpc::Policy;
use std::sync::Arc;
use tracing::instrument;

use super::locks::ResourceLocks;
use super::policy::{add_member, has_member, remove_member};
use super::store::PolicyStore;
use crate::models::IamMember;

/// Serializes policy updates per resource against one [`PolicyStore`].
///
/// The per-resource lock is the only concurrency control: writes replace the
/// whole document and the etag is passed back as fetched, so concurrent
/// writers in other processes can still overwrite each other.
pub struct PolicyUpdater {
    store: Arc<dyn PolicyStore>,
    locks: ResourceLocks,
}

impl PolicyUpdater {
    pub fn new(store: Arc<dyn PolicyStore>) -> Self {
        Self {
            store,
            locks: ResourceLocks::new(),
        }
    }

    pub fn locks(&self) -> &ResourceLocks {
        &self.locks
    }

    /// Grant `member.role` to `member.member` on `member.resource`.
    #[instrument(skip_all, fields(resource = %member.resource(), role = %member.role(), member = %member.member()))]
    pub async fn bind(&self, member: &IamMember) -> Result<Policy, AppError> {
        let _guard = self.locks.acquire(member.resource()).await;

        let mut policy = self.store.get_policy(member.resource()).await?;
        let changed = add_member(&mut policy, member.role(), member.member());
        let stored = self.store.set_policy(member.resource(), policy).await?;

        tracing::info!(changed, "Bound member to role");
        Ok(stored)
    }

    /// Revoke `member.role` from `member.member` on `member.resource`.
    ///
    /// The policy is written back even when the member was not present.
    #[instrument(skip_all, fields(resource = %member.resource(), role = %member.role(), member = %member.member()))]
    pub async fn unbind(&self, member: &IamMember) -> Result<Policy, AppError> {
        let _guard = self.locks.acquire(member.resource()).await;

        let mut policy = self.store.get_policy(member.resource()).await?;
        let changed = remove_member(&mut policy, member.role(), member.member());
        let stored = self.store.set_policy(member.resource(), policy).await?;

        tracing::info!(changed, "Unbound member from role");
        Ok(stored)
    }

    /// Whether the binding currently exists. Does not take the resource lock.
    #[instrument(skip_all, fields(resource = %member.resource(), role = %member.role(), member = %member.member()))]
    pub async fn lookup(&self, member: &IamMember) -> Result<bool, AppError> {
        let policy = self.store.get_policy(member.resource()).await?;
        let found = has_member(&policy, member.role(), member.member());
        tracing::debug!(found, "Looked up binding");
        Ok(found)
    }
}
