//! Wallet address type — bech32 string with the chain's `secret` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wallet address on the gated chain, always bech32-encoded with the
/// `secret` human-readable prefix.
///
/// Derived from the signer's public key via SHA-256 hashing + bech32
/// encoding (see `tokengate_crypto::derive_address`). Globally unique per
/// signer, and the exclusivity key for identity↔wallet bindings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// The bech32 human-readable part for all addresses on this chain.
    pub const HRP: &'static str = "secret";

    /// Create a new wallet address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `secret1` (the HRP plus the
    /// bech32 separator). Untrusted strings must go through
    /// `tokengate_crypto::validate_address` instead.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(
            s.starts_with("secret1"),
            "address must be bech32 with hrp `secret`"
        );
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
