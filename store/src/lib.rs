//! Abstract storage traits for the tokengate verification protocol.
//!
//! Every storage backend (SQL, key-value, in-memory for testing) implements
//! these traits. The rest of the codebase depends only on the traits, so
//! verification survives process restarts and works across service
//! instances when backed by a durable store.

pub mod audit;
pub mod binding;
pub mod challenge;
pub mod error;
pub mod rate_limit;

pub use audit::{AuditEntry, AuditStore};
pub use binding::{Binding, BindingStore};
pub use challenge::{Challenge, ChallengeStore};
pub use error::StoreError;
pub use rate_limit::{RateLimitStore, RateRecord};

/// Unified store interface providing access to all storage subsystems.
///
/// Implementors expose the four component stores; the verification service
/// coordinates across them. Backends must serialize conflicting writes —
/// in particular, `BindingStore::commit_binding` is an atomic
/// check-and-commit.
pub trait GateStore {
    type Challenges: ChallengeStore;
    type Bindings: BindingStore;
    type RateLog: RateLimitStore;
    type Audit: AuditStore;

    fn challenges(&self) -> &Self::Challenges;
    fn bindings(&self) -> &Self::Bindings;
    fn rate_log(&self) -> &Self::RateLog;
    fn audit(&self) -> &Self::Audit;
}
