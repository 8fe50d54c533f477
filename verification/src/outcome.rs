//! Result types the caller-facing API returns.

use serde::{Deserialize, Serialize};
use tokengate_types::{Identity, WalletAddress};

/// A successful verification: the proven wallet and its token count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedOutcome {
    pub wallet: WalletAddress,
    pub token_count: u32,
}

/// Per-binding outcome of a bulk re-verification sweep.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReVerifyStatus {
    /// Still holds qualifying tokens.
    StillValid { token_count: u32 },
    /// Zero tokens — soft-revoked, record retained.
    Revoked,
    /// The ownership check failed; the binding was left untouched.
    Error(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReVerifyDetail {
    pub identity: Identity,
    pub wallet: WalletAddress,
    pub status: ReVerifyStatus,
}

/// Aggregated result of `re_verify_all`.
///
/// The sweep is not atomic across users; each user's re-check is
/// independently idempotent, so a partial sweep is safe to repeat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReVerifyReport {
    pub total: u64,
    pub still_valid: u64,
    pub revoked: u64,
    pub errors: u64,
    pub details: Vec<ReVerifyDetail>,
}

/// Counts from an explicit maintenance pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    pub challenges_purged: u64,
    pub rate_records_purged: u64,
}
