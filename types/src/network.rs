//! Network identifier.

use serde::{Deserialize, Serialize};

/// Identifies which chain network ownership queries and challenge messages
/// are scoped to. Embedding the chain id in the challenge message prevents
/// a signature collected on one network from being replayed on another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    /// The production network.
    Mainnet,
    /// The public test network.
    Testnet,
    /// Local development network.
    Dev,
}

impl NetworkId {
    /// The chain id embedded in challenge messages for this network.
    pub fn chain_id(&self) -> &'static str {
        match self {
            Self::Mainnet => "secret-4",
            Self::Testnet => "pulsar-3",
            Self::Dev => "secretdev-1",
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Dev => "dev",
        }
    }
}
