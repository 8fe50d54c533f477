//! Wallet address derivation from public keys.
//!
//! Address format: bech32 with human-readable prefix `secret`.
//! Payload: the first 20 bytes of SHA-256(compressed public key).

use bech32::{Bech32, Hrp};
use tokengate_types::{PublicKey, WalletAddress};

/// The bech32 human-readable part for all derived addresses.
const HRP: Hrp = Hrp::parse_unchecked("secret");

/// Number of digest bytes that form the address payload.
const PAYLOAD_LEN: usize = 20;

/// Derive a `secret1…` wallet address from a compressed public key.
///
/// Process:
/// 1. digest = SHA-256(public_key)
/// 2. payload = digest[0..20]
/// 3. address = bech32("secret", payload)
pub fn derive_address(public_key: &PublicKey) -> WalletAddress {
    let digest = crate::sha256(public_key.as_bytes());
    let encoded = bech32::encode::<Bech32>(HRP, &digest[..PAYLOAD_LEN])
        .expect("20-byte payload is within the bech32 length limit");
    WalletAddress::new(encoded)
}

/// Extract the 20-byte address payload from a valid address string.
///
/// Returns `None` if the string is not bech32, carries the wrong prefix,
/// fails its checksum, or decodes to the wrong payload length.
pub fn decode_address(address: &str) -> Option<[u8; PAYLOAD_LEN]> {
    let (hrp, data) = bech32::decode(address).ok()?;
    if hrp != HRP {
        return None;
    }
    data.as_slice().try_into().ok()
}

/// Validate that an address string is well-formed with a correct checksum.
pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_some()
}
