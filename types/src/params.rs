//! Gate parameters — every tunable of the verification protocol.

use crate::network::NetworkId;
use serde::{Deserialize, Serialize};

/// Configuration for the verification gate.
///
/// serde-derived so an embedding host can load it from TOML/JSON; the
/// library itself never reads files or environment variables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GateParams {
    /// Collection name embedded in challenge messages and user guidance.
    pub project_name: String,

    /// Which chain network ownership is checked against. The chain id is
    /// embedded in every challenge message.
    pub network: NetworkId,

    // ── Challenges ───────────────────────────────────────────────────────
    /// Lifetime of an issued challenge in seconds. Default: 10 minutes.
    pub challenge_expiry_secs: u64,

    // ── Rate limiting ────────────────────────────────────────────────────
    /// Trailing window length for the rate limiter, in seconds.
    /// Default: 60.
    pub rate_limit_window_secs: u64,

    /// Maximum actions per (identity, action) within the trailing window.
    /// Default: 5.
    pub rate_limit_max_requests: u32,

    /// Retention horizon for rate-log records, in seconds. Records older
    /// than this are purged by maintenance; purging is cleanup only, never
    /// correctness-bearing. Default: 24 hours.
    pub rate_retention_secs: u64,
}

impl GateParams {
    /// Defaults for a Secret Network NFT collection gate.
    pub fn secret_defaults() -> Self {
        Self {
            project_name: "NFT Project".to_string(),
            network: NetworkId::Mainnet,
            challenge_expiry_secs: 10 * 60,
            rate_limit_window_secs: 60,
            rate_limit_max_requests: 5,
            rate_retention_secs: 24 * 3600,
        }
    }
}

impl Default for GateParams {
    fn default() -> Self {
        Self::secret_defaults()
    }
}
