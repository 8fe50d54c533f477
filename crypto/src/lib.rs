//! Cryptographic primitives for the tokengate protocol.
//!
//! - **ECDSA over secp256k1** for signature verification (the chain's
//!   signing scheme, as produced by browser wallet signers)
//! - **SHA-256** for message digests and address derivation
//! - **bech32** address encoding with the `secret` human-readable prefix
//! - Strict parsing of the wallet signer's JSON signature payload
//!
//! Verification and address derivation are independent steps: a valid
//! signature always yields a derivable address; an invalid signature yields
//! no address regardless of what decodes.

pub mod address;
pub mod hash;
pub mod keys;
pub mod payload;
pub mod sign;

pub use address::{decode_address, derive_address, validate_address};
pub use hash::{sha256, sha256_multi};
pub use keys::{generate_keypair, keypair_from_seed, public_from_private};
pub use payload::{PayloadError, SignedPayload};
pub use sign::{sign_message, verify_message, verify_signer};
