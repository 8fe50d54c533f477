//! Identity↔wallet binding records and their storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use tokengate_types::{Identity, Timestamp, WalletAddress};

/// A durable association between a requester identity and a proven wallet.
///
/// A wallet is bound to at most one identity at a time; an identity has at
/// most one binding, upsertable. `verified` is a soft flag: a failed
/// ownership re-check revokes it without destroying the record, preserving
/// history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Binding {
    pub identity: Identity,
    pub wallet: WalletAddress,
    pub verified: bool,
    pub verified_at: Timestamp,
    pub last_checked_at: Timestamp,
}

/// Durable storage for bindings.
pub trait BindingStore {
    fn get_binding(&self, identity: &Identity) -> Result<Option<Binding>, StoreError>;

    /// Look up whichever identity currently holds `wallet`, if any.
    fn find_by_wallet(&self, wallet: &WalletAddress) -> Result<Option<Binding>, StoreError>;

    /// Atomic check-and-commit: upserts iff `binding.wallet` is unbound or
    /// already bound to `binding.identity`. Fails with
    /// `StoreError::Conflict` when a different identity holds the wallet.
    ///
    /// This is the primitive that keeps wallet↔identity exclusivity intact
    /// under concurrent `complete` calls; implementations must perform the
    /// check and the write in one transaction (or equivalent).
    fn commit_binding(&self, binding: &Binding) -> Result<(), StoreError>;

    /// Flip the soft `verified` flag and refresh `last_checked_at`.
    /// `NotFound` if the identity has no binding.
    fn set_verified(
        &self,
        identity: &Identity,
        verified: bool,
        now: Timestamp,
    ) -> Result<(), StoreError>;

    /// All bindings currently flagged verified.
    fn list_verified(&self) -> Result<Vec<Binding>, StoreError>;
}
