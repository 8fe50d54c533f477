//! Ownership oracle boundary.
//!
//! The on-chain query client is an external collaborator; this crate
//! defines the trait it plugs in behind and the three-way classification
//! of its failure modes:
//!
//! - **access-restricted** — ownership cannot be determined without an
//!   extra credential (a viewing key) the requester hasn't supplied
//! - **empty** — the query succeeded with zero tokens; this is the `Ok`
//!   case with `owns: false`, distinct from restricted
//! - **unavailable** — transient network/timeout failure, eligible for a
//!   single retry by the caller and never silently treated as "no tokens"
//!
//! Implementations own their query timeout; a timed-out query surfaces as
//! `Unavailable`, it never hangs the caller.

pub mod error;

pub use error::OracleError;

use serde::{Deserialize, Serialize};
use tokengate_types::WalletAddress;

/// Trait answering "does wallet W hold qualifying tokens?".
pub trait OwnershipOracle: Send + Sync {
    /// Query how many qualifying tokens `wallet` currently holds.
    fn check_ownership(&self, wallet: &WalletAddress) -> Result<Ownership, OracleError>;

    /// Metadata of the gated collection's contract.
    fn contract_metadata(&self) -> Result<ContractMetadata, OracleError>;

    /// Human-readable name of this oracle backend.
    fn name(&self) -> &str;
}

/// The outcome of a successful ownership query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub owns: bool,
    pub count: u32,
}

impl Ownership {
    pub fn with_count(count: u32) -> Self {
        Self {
            owns: count > 0,
            count,
        }
    }

    pub const NONE: Self = Self {
        owns: false,
        count: 0,
    };
}

/// Metadata of the gated collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMetadata {
    pub name: String,
    pub symbol: String,
    pub total_supply: u64,
}
