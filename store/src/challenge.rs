//! One-time challenge records and their storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use tokengate_types::{Identity, Timestamp};

/// A one-time challenge a requester must sign to prove wallet control.
///
/// Lifecycle: created on verification start, consumed exactly once on a
/// successful signature check, garbage-collected after expiry or use.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Challenge {
    /// Unique lookup key (16 random bytes, hex-encoded).
    pub id: String,
    /// The identity this challenge was issued to.
    pub identity: Identity,
    /// The exact text the requester must sign.
    pub message: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    /// Set once on consumption; a used challenge can never be revalidated.
    pub used: bool,
}

impl Challenge {
    /// Whether the challenge can still be consumed at `now`.
    ///
    /// Expired and used are both unusable; callers cannot distinguish an
    /// expired challenge from one that never existed.
    pub fn is_usable(&self, now: Timestamp) -> bool {
        !self.used && now < self.expires_at
    }
}

/// Durable storage for challenges.
pub trait ChallengeStore {
    fn put_challenge(&self, challenge: &Challenge) -> Result<(), StoreError>;

    fn get_challenge(&self, id: &str) -> Result<Option<Challenge>, StoreError>;

    /// Mark a challenge as used. Idempotent; `NotFound` if the id was never
    /// issued.
    fn mark_used(&self, id: &str) -> Result<(), StoreError>;

    /// Mark every unused challenge belonging to `identity` as used, so a
    /// fresh `start` supersedes any prior session. Returns how many were
    /// invalidated.
    fn invalidate_for_identity(&self, identity: &Identity) -> Result<u64, StoreError>;

    /// Delete challenges that are used or expired at `now`. Returns how
    /// many were removed. Purging is cleanup, never correctness-bearing.
    fn purge_challenges(&self, now: Timestamp) -> Result<u64, StoreError>;
}
