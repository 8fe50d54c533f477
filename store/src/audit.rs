//! Append-only audit log.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use tokengate_types::{Identity, Timestamp};

/// One audit record. Write-only from the protocol's perspective — entries
/// are never mutated, so the log can reconstruct every decision.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEntry {
    pub identity: Identity,
    pub action: String,
    /// Free-form or JSON detail, depending on the action.
    pub detail: Option<String>,
    pub timestamp: Timestamp,
}

/// Durable storage for the audit log.
pub trait AuditStore {
    fn append_audit(&self, entry: &AuditEntry) -> Result<(), StoreError>;

    /// Most recent entries across all identities, newest first.
    fn recent_audits(&self, limit: usize) -> Result<Vec<AuditEntry>, StoreError>;

    /// Most recent entries for one identity, newest first.
    fn audits_for_identity(
        &self,
        identity: &Identity,
        limit: usize,
    ) -> Result<Vec<AuditEntry>, StoreError>;
}
