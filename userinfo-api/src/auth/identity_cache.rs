use std::time::Duration;

use moka::sync::Cache;

use crate::domain::models::ApplicationIdentity;

/// Process-wide token → identity map. Entries expire a fixed time after
/// insertion; reads do not extend their life.
pub trait IdentityCache: Send + Sync + 'static {
    fn get(&self, token: &str) -> Option<ApplicationIdentity>;

    fn insert(&self, token: &str, identity: ApplicationIdentity);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityCachePolicy {
    pub ttl: Duration,
    pub max_capacity: u64,
}

impl Default for IdentityCachePolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 10_000,
        }
    }
}

#[derive(Clone)]
pub struct MokaIdentityCache {
    entries: Cache<String, ApplicationIdentity>,
}

impl MokaIdentityCache {
    pub fn new(policy: IdentityCachePolicy) -> Self {
        let entries = Cache::builder()
            .max_capacity(policy.max_capacity)
            .time_to_live(policy.ttl)
            .build();
        Self { entries }
    }
}

impl IdentityCache for MokaIdentityCache {
    fn get(&self, token: &str) -> Option<ApplicationIdentity> {
        self.entries.get(token)
    }

    fn insert(&self, token: &str, identity: ApplicationIdentity) {
        self.entries.insert(token.to_string(), identity);
    }
}
