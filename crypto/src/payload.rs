//! Strict parsing of the wallet signer's JSON signature payload.
//!
//! Wallet signers hand the requester a JSON blob of exactly this shape:
//!
//! ```json
//! {
//!   "signature": "<base64>",
//!   "pub_key": {
//!     "type": "tendermint/PubKeySecp256k1",
//!     "value": "<base64>"
//!   }
//! }
//! ```
//!
//! The blob is adversarial input. It is validated structurally here, before
//! any cryptography runs, so "you pasted it wrong" and "the signature is
//! wrong" are distinct failures with distinct guidance.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use thiserror::Error;
use tokengate_types::{PublicKey, Signature};

/// The only accepted public-key type tag.
const PUBKEY_TYPE: &str = "tendermint/PubKeySecp256k1";

/// A structurally valid signature payload, ready for verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedPayload {
    pub signature: Signature,
    pub public_key: PublicKey,
}

/// Why a payload failed structural validation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("payload is not the expected JSON shape: {0}")]
    Malformed(String),

    #[error("unsupported public key type `{0}`")]
    UnsupportedKeyType(String),

    #[error("`{field}` is not valid base64")]
    InvalidEncoding { field: &'static str },

    #[error("`{field}` has wrong length: expected {expected} bytes, got {got}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPayload {
    signature: String,
    pub_key: RawPubKey,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPubKey {
    #[serde(rename = "type")]
    key_type: String,
    value: String,
}

fn decode_fixed<const N: usize>(
    field: &'static str,
    encoded: &str,
) -> Result<[u8; N], PayloadError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|_| PayloadError::InvalidEncoding { field })?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| PayloadError::InvalidLength {
            field,
            expected: N,
            got: bytes.len(),
        })
}

impl SignedPayload {
    /// Parse and validate the externally supplied payload text.
    ///
    /// Rejects anything that is not JSON with exactly a signature field and
    /// a typed public-key field, base64-decoding to the right byte lengths.
    pub fn parse(text: &str) -> Result<Self, PayloadError> {
        let raw: RawPayload = serde_json::from_str(text.trim())
            .map_err(|e| PayloadError::Malformed(e.to_string()))?;

        if raw.pub_key.key_type != PUBKEY_TYPE {
            return Err(PayloadError::UnsupportedKeyType(raw.pub_key.key_type));
        }

        let signature = Signature(decode_fixed::<64>("signature", &raw.signature)?);
        let public_key = PublicKey(decode_fixed::<33>("pub_key.value", &raw.pub_key.value)?);

        Ok(Self {
            signature,
            public_key,
        })
    }
}
