//! Cryptographic key types for wallet signers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 33-byte compressed secp256k1 public key (SEC1 encoding).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 33]);

/// A 32-byte secp256k1 private scalar.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or
/// `Clone` to prevent accidental exposure. Key bytes are zeroized on drop.
/// The verification protocol never holds private keys; this exists for
/// tooling and tests that produce signatures.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// A 64-byte fixed ECDSA signature (`r || s`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

/// A secp256k1 key pair (public + private).
///
/// Use `tokengate_crypto::generate_keypair()` or
/// `tokengate_crypto::keypair_from_seed()` to construct key pairs.
/// This struct is intentionally just data.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }
}

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

// serde derives stop at 32-byte arrays, so the 33/64-byte newtypes carry
// visitor-based implementations.

macro_rules! serde_byte_array {
    ($name:ident, $len:expr) => {
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_bytes(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct ArrayVisitor;

                impl<'de> serde::de::Visitor<'de> for ArrayVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                        write!(f, "{} bytes", $len)
                    }

                    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                        let arr: [u8; $len] = v
                            .try_into()
                            .map_err(|_| E::invalid_length(v.len(), &self))?;
                        Ok($name(arr))
                    }

                    fn visit_seq<A: serde::de::SeqAccess<'de>>(
                        self,
                        mut seq: A,
                    ) -> Result<Self::Value, A::Error> {
                        let mut arr = [0u8; $len];
                        for (i, byte) in arr.iter_mut().enumerate() {
                            *byte = seq
                                .next_element()?
                                .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                        }
                        Ok($name(arr))
                    }
                }

                deserializer.deserialize_bytes(ArrayVisitor)
            }
        }
    };
}

serde_byte_array!(PublicKey, 33);
serde_byte_array!(Signature, 64);
