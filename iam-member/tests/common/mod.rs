#![allow(dead_code)]

use async_trait::async_trait;
use iam_member::services::PolicyStore;
use iam_member::startup::Provider;
use service_core::error::AppError;
use service_core::grpc::Policy;
use service_core::prost::Message;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ROOT: &str = "/";
pub const ADMIN: &str = "roles/account.Admin";
pub const ADMIN2: &str = "roles/account.Admin2";
pub const ALICE: &str = "serviceAccount:admin@foo.iam.gserviceaccount.com";
pub const BOB: &str = "serviceAccount:admin2@foo.iam.gserviceaccount.com";

/// In-memory policy store that records every call.
///
/// Policies are kept in their encoded form, so every read and write passes
/// through the same protobuf decode and encode as the real transport.
///
/// A fetch opens a read-modify-write window for its resource and the next
/// write closes it. A fetch on a resource whose window is still open counts as
/// an overlap. Lookups also fetch, so tests that check overlaps should not mix
/// in concurrent lookups.
#[derive(Default)]
pub struct MockPolicyStore {
    policies: Mutex<HashMap<String, Vec<u8>>>,
    open_windows: Mutex<HashMap<String, bool>>,
    overlaps: AtomicUsize,
    gets: AtomicUsize,
    sets: AtomicUsize,
    latency: Duration,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
}

impl MockPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `latency` inside every call, widening race windows.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn fail_gets(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sets(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    pub fn policy(&self, resource: &str) -> Policy {
        self.policies
            .lock()
            .unwrap()
            .get(resource)
            .map(|wire| Policy::decode(wire.as_slice()).unwrap())
            .unwrap_or_default()
    }

    /// Encoded policy of `resource` as last written.
    pub fn wire(&self, resource: &str) -> Option<Vec<u8>> {
        self.policies.lock().unwrap().get(resource).cloned()
    }

    pub fn put_policy(&self, resource: &str, policy: Policy) {
        self.policies
            .lock()
            .unwrap()
            .insert(resource.to_string(), policy.encode_to_vec());
    }

    pub fn members(&self, resource: &str, role: &str) -> Option<Vec<String>> {
        self.policy(resource)
            .bindings
            .into_iter()
            .find(|b| b.role == role)
            .map(|b| b.members)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn overlaps(&self) -> usize {
        self.overlaps.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PolicyStore for MockPolicyStore {
    async fn get_policy(&self, resource: &str) -> Result<Policy, AppError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(AppError::Unauthorized(anyhow::anyhow!("token expired")));
        }

        {
            let mut windows = self.open_windows.lock().unwrap();
            let open = windows.entry(resource.to_string()).or_insert(false);
            if *open {
                self.overlaps.fetch_add(1, Ordering::SeqCst);
            }
            *open = true;
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.policy(resource))
    }

    async fn set_policy(&self, resource: &str, policy: Policy) -> Result<Policy, AppError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.open_windows
            .lock()
            .unwrap()
            .insert(resource.to_string(), false);

        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(AppError::ServiceUnavailable("connection reset".to_string()));
        }

        self.put_policy(resource, policy);
        Ok(self.policy(resource))
    }
}

pub fn provider(store: &Arc<MockPolicyStore>) -> Provider {
    Provider::with_store(Arc::clone(store) as Arc<dyn PolicyStore>)
}
