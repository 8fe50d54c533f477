//! Append-only action log backing the rate limiter.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use tokengate_types::{Identity, Timestamp};

/// One recorded action. Rate buckets are derived at query time from these
/// records — there is no stored counter to drift.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RateRecord {
    pub identity: Identity,
    pub action: String,
    pub timestamp: Timestamp,
}

/// Durable storage for the rate-limit action log.
pub trait RateLimitStore {
    fn record_action(&self, record: &RateRecord) -> Result<(), StoreError>;

    /// Count records for (identity, action) strictly newer than `since`.
    fn count_actions_since(
        &self,
        identity: &Identity,
        action: &str,
        since: Timestamp,
    ) -> Result<u64, StoreError>;

    /// Delete records older than `cutoff`. Returns how many were removed.
    fn purge_actions_before(&self, cutoff: Timestamp) -> Result<u64, StoreError>;
}
