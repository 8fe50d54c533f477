//! Sliding-window rate limiter over the append-only action log.
//!
//! Windows are *trailing*, computed at call time from timestamped records
//! rather than fixed buckets, so a burst straddling a bucket boundary
//! cannot double its allowance.

use tokengate_store::{RateLimitStore, RateRecord};
use tokengate_types::{Identity, Timestamp};

/// The rate-limited actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateAction {
    VerifyStart,
    VerifyComplete,
}

impl RateAction {
    /// Stable string form used in the action log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VerifyStart => "verify_start",
            Self::VerifyComplete => "verify_complete",
        }
    }
}

/// Counts actions per (identity, action) within a trailing window.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    window_secs: u64,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(window_secs: u64, max_requests: u32) -> Self {
        Self {
            window_secs,
            max_requests,
        }
    }

    /// Whether `identity` may perform `action` at `now`.
    ///
    /// Never fails: a store read failure degrades to "allowed" (with a
    /// warning) rather than locking every requester out, and an absent
    /// history means allowed.
    pub fn allow<S: RateLimitStore>(
        &self,
        store: &S,
        identity: &Identity,
        action: RateAction,
        now: Timestamp,
    ) -> bool {
        let since = now.minus_secs(self.window_secs);
        match store.count_actions_since(identity, action.as_str(), since) {
            Ok(count) => count < u64::from(self.max_requests),
            Err(e) => {
                tracing::warn!(
                    identity = %identity,
                    action = action.as_str(),
                    error = %e,
                    "rate-limit read failed, allowing request"
                );
                true
            }
        }
    }

    /// Record that `identity` performed `action` at `now`.
    ///
    /// Fire-and-forget: a failed write is logged and dropped.
    pub fn record<S: RateLimitStore>(
        &self,
        store: &S,
        identity: &Identity,
        action: RateAction,
        now: Timestamp,
    ) {
        let record = RateRecord {
            identity: identity.clone(),
            action: action.as_str().to_string(),
            timestamp: now,
        };
        if let Err(e) = store.record_action(&record) {
            tracing::warn!(
                identity = %identity,
                action = action.as_str(),
                error = %e,
                "rate-limit record failed"
            );
        }
    }
}
