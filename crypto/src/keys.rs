//! secp256k1 key generation.

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use tokengate_types::{KeyPair, PrivateKey, PublicKey};

fn compressed_public(signing_key: &SigningKey) -> PublicKey {
    let point = signing_key.verifying_key().to_encoded_point(true);
    let mut bytes = [0u8; 33];
    bytes.copy_from_slice(point.as_bytes());
    PublicKey(bytes)
}

/// Generate a new secp256k1 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::random(&mut OsRng);
    let public = compressed_public(&signing_key);
    let mut private = [0u8; 32];
    private.copy_from_slice(&signing_key.to_bytes());
    KeyPair {
        public,
        private: PrivateKey(private),
    }
}

/// Derive the public key from a private key.
///
/// Returns `None` if the bytes are not a valid secp256k1 scalar
/// (zero or not below the group order).
pub fn public_from_private(private: &PrivateKey) -> Option<PublicKey> {
    let signing_key = SigningKey::from_slice(&private.0).ok()?;
    Some(compressed_public(&signing_key))
}

/// Derive a key pair from a 32-byte seed (deterministic).
///
/// Returns `None` for the rare seeds that are not a valid scalar.
pub fn keypair_from_seed(seed: &[u8; 32]) -> Option<KeyPair> {
    let signing_key = SigningKey::from_slice(seed).ok()?;
    let public = compressed_public(&signing_key);
    Some(KeyPair {
        public,
        private: PrivateKey(*seed),
    })
}
