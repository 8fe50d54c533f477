//! ECDSA message signing and verification with the canonical envelope.
//!
//! Every signature in the protocol is made over the enveloped message
//! `"\x19secret Signed Message:\n" + byte_length + message`, digested with
//! SHA-256 and signed with ECDSA over secp256k1. Signatures over the raw,
//! unwrapped message are rejected: the envelope pins the signing domain so
//! a challenge signature cannot double as a transaction or as a signature
//! for another protocol.

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};
use tokengate_types::{PrivateKey, PublicKey, Signature, WalletAddress};

use crate::payload::SignedPayload;

/// Wrap a message in the chain's signed-message envelope.
fn envelope(message: &str) -> Vec<u8> {
    let mut wrapped = Vec::with_capacity(message.len() + 32);
    wrapped.extend_from_slice(b"\x19secret Signed Message:\n");
    wrapped.extend_from_slice(message.len().to_string().as_bytes());
    wrapped.extend_from_slice(message.as_bytes());
    wrapped
}

/// Sign a message with a private key, returning the fixed 64-byte signature.
///
/// The message is enveloped before signing; signing is deterministic
/// (RFC 6979). Returns `None` if the private key bytes are not a valid
/// scalar. The verification flow never calls this; it exists for tooling
/// and tests.
pub fn sign_message(message: &str, private_key: &PrivateKey) -> Option<Signature> {
    let signing_key = SigningKey::from_slice(&private_key.0).ok()?;
    let sig: EcdsaSignature = signing_key.sign(&envelope(message));
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&sig.to_bytes());
    Some(Signature(bytes))
}

/// Verify an enveloped-message signature against a public key.
///
/// Returns `true` only for a valid ECDSA signature over the enveloped
/// message. Malformed signatures and keys not on the curve return `false`,
/// never panic.
pub fn verify_message(message: &str, signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(&public_key.0) else {
        return false;
    };
    let Ok(sig) = EcdsaSignature::from_slice(&signature.0) else {
        return false;
    };
    verifying_key.verify(&envelope(message), &sig).is_ok()
}

/// Verify a signed payload and recover the signer's wallet address.
///
/// Verification and derivation are two independent steps: a valid
/// signature always yields the address derived from the payload's public
/// key; an invalid signature yields `None`.
pub fn verify_signer(message: &str, payload: &SignedPayload) -> Option<WalletAddress> {
    if !verify_message(message, &payload.signature, &payload.public_key) {
        return None;
    }
    Some(crate::derive_address(&payload.public_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{generate_keypair, keypair_from_seed};

    #[test]
    fn sign_and_verify() {
        let kp = generate_keypair();
        let msg = "test message for the gate";
        let sig = sign_message(msg, &kp.private).unwrap();
        assert!(verify_message(msg, &sig, &kp.public));
    }

    #[test]
    fn wrong_message_fails() {
        let kp = generate_keypair();
        let sig = sign_message("correct message", &kp.private).unwrap();
        assert!(!verify_message("wrong message", &sig, &kp.public));
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = generate_keypair();
        let kp2 = generate_keypair();
        let sig = sign_message("test", &kp1.private).unwrap();
        assert!(!verify_message("test", &sig, &kp2.public));
    }

    #[test]
    fn signature_deterministic() {
        let kp = keypair_from_seed(&[99u8; 32]).unwrap();
        let sig1 = sign_message("deterministic test", &kp.private).unwrap();
        let sig2 = sign_message("deterministic test", &kp.private).unwrap();
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn bit_flip_in_signature_fails() {
        let kp = generate_keypair();
        let msg = "flip me";
        let sig = sign_message(msg, &kp.private).unwrap();
        for byte in 0..64 {
            let mut corrupted = sig.clone();
            corrupted.0[byte] ^= 0x01;
            assert!(
                !verify_message(msg, &corrupted, &kp.public),
                "flipped byte {byte} still verified"
            );
        }
    }

    #[test]
    fn empty_message() {
        let kp = generate_keypair();
        let sig = sign_message("", &kp.private).unwrap();
        assert!(verify_message("", &sig, &kp.public));
    }

    #[test]
    fn invalid_public_key_fails_closed() {
        let kp = generate_keypair();
        let sig = sign_message("test", &kp.private).unwrap();
        let bad_key = PublicKey([0xFF; 33]);
        assert!(!verify_message("test", &sig, &bad_key));
    }

    #[test]
    fn zero_signature_fails_closed() {
        let kp = generate_keypair();
        assert!(!verify_message("test", &Signature([0u8; 64]), &kp.public));
    }

    #[test]
    fn unwrapped_signature_rejected() {
        // A signature over the raw message bytes, skipping the envelope,
        // must not verify.
        let kp = generate_keypair();
        let msg = "raw message without envelope";
        let signing_key = k256::ecdsa::SigningKey::from_slice(&kp.private.0).unwrap();
        let raw_sig: EcdsaSignature = signing_key.sign(msg.as_bytes());
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&raw_sig.to_bytes());
        assert!(!verify_message(msg, &Signature(bytes), &kp.public));
    }

    #[test]
    fn envelope_binds_message_length() {
        // Same prefix, different declared lengths: "a" vs "ab" truncated —
        // the length field keeps the envelopes distinct.
        assert_ne!(envelope("a"), envelope("ab")[..envelope("a").len()].to_vec());
    }

    #[test]
    fn verify_signer_recovers_expected_address() {
        let kp = keypair_from_seed(&[5u8; 32]).unwrap();
        let expected = crate::derive_address(&kp.public);
        let msg = "challenge text";
        let sig = sign_message(msg, &kp.private).unwrap();
        let payload = SignedPayload {
            signature: sig,
            public_key: kp.public.clone(),
        };
        assert_eq!(verify_signer(msg, &payload), Some(expected));
    }

    #[test]
    fn verify_signer_invalid_yields_no_address() {
        let kp = generate_keypair();
        let sig = sign_message("signed this", &kp.private).unwrap();
        let payload = SignedPayload {
            signature: sig,
            public_key: kp.public.clone(),
        };
        assert_eq!(verify_signer("but claimed that", &payload), None);
    }
}
