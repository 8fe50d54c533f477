//! Fundamental types for the tokengate verification protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: requester identities, wallet addresses, cryptographic key
//! material, timestamps, network identifiers, and the gate parameters.

pub mod address;
pub mod identity;
pub mod keys;
pub mod network;
pub mod params;
pub mod time;

pub use address::WalletAddress;
pub use identity::Identity;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::NetworkId;
pub use params::GateParams;
pub use time::Timestamp;
