//! Per-resource mutual exclusion for policy read-modify-write transactions.
//!
//! A transaction on one resource never interleaves with another transaction
//! on the same resource, while transactions on different resources proceed
//! concurrently. Locks are created lazily and kept for the lifetime of the
//! registry; the key space is the set of managed resources.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-resource locks, owned by the provider instance.
#[derive(Debug, Default)]
pub struct ResourceLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

/// Exclusive hold on one resource. Dropping it releases the resource.
#[derive(Debug)]
pub struct ResourceGuard {
    resource: String,
    _guard: OwnedMutexGuard<()>,
}

impl ResourceGuard {
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        tracing::trace!(resource = %self.resource, "Released resource lock");
    }
}

impl ResourceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other transaction holds `resource`, then hold it.
    ///
    /// The map shard guard is released before awaiting the resource lock, so
    /// a long transaction on one resource never delays lookups or inserts for
    /// others. Acquisition has no timeout and cannot fail.
    pub async fn acquire(&self, resource: &str) -> ResourceGuard {
        let lock = self.lock_for(resource);
        let guard = lock.lock_owned().await;
        tracing::trace!(resource = %resource, "Acquired resource lock");
        ResourceGuard {
            resource: resource.to_string(),
            _guard: guard,
        }
    }

    /// Number of resources that have been locked at least once.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn lock_for(&self, resource: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.get(resource) {
            return Arc::clone(lock.value());
        }
        // Another caller may have inserted between the read and here;
        // `entry` re-checks under the shard write lock.
        let entry = self.locks.entry(resource.to_string()).or_default();
        Arc::clone(entry.value())
    }
}
