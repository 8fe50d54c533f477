//! Nullable store — thread-safe in-memory storage for testing.

use std::collections::HashMap;
use std::sync::Mutex;
use tokengate_store::{
    AuditEntry, AuditStore, Binding, BindingStore, Challenge, ChallengeStore, GateStore,
    RateLimitStore, RateRecord, StoreError,
};
use tokengate_types::{Identity, Timestamp, WalletAddress};

/// An in-memory implementation of every gate storage trait.
///
/// Thread-safe; the bindings map is guarded by a single mutex, so
/// `commit_binding` performs its wallet-exclusivity check and the write as
/// one atomic step, matching what a durable backend must do in a
/// transaction.
pub struct NullStore {
    challenges: Mutex<HashMap<String, Challenge>>,
    bindings: Mutex<HashMap<String, Binding>>,
    rate_log: Mutex<Vec<RateRecord>>,
    audit_log: Mutex<Vec<AuditEntry>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            challenges: Mutex::new(HashMap::new()),
            bindings: Mutex::new(HashMap::new()),
            rate_log: Mutex::new(Vec::new()),
            audit_log: Mutex::new(Vec::new()),
        }
    }

    /// Number of challenges currently stored (live, used, and expired).
    pub fn challenge_count(&self) -> usize {
        self.challenges.lock().unwrap().len()
    }

    /// Number of rate records currently stored.
    pub fn rate_record_count(&self) -> usize {
        self.rate_log.lock().unwrap().len()
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChallengeStore for NullStore {
    fn put_challenge(&self, challenge: &Challenge) -> Result<(), StoreError> {
        self.challenges
            .lock()
            .unwrap()
            .insert(challenge.id.clone(), challenge.clone());
        Ok(())
    }

    fn get_challenge(&self, id: &str) -> Result<Option<Challenge>, StoreError> {
        Ok(self.challenges.lock().unwrap().get(id).cloned())
    }

    fn mark_used(&self, id: &str) -> Result<(), StoreError> {
        let mut challenges = self.challenges.lock().unwrap();
        match challenges.get_mut(id) {
            Some(challenge) => {
                challenge.used = true;
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    fn invalidate_for_identity(&self, identity: &Identity) -> Result<u64, StoreError> {
        let mut challenges = self.challenges.lock().unwrap();
        let mut invalidated = 0;
        for challenge in challenges.values_mut() {
            if challenge.identity == *identity && !challenge.used {
                challenge.used = true;
                invalidated += 1;
            }
        }
        Ok(invalidated)
    }

    fn purge_challenges(&self, now: Timestamp) -> Result<u64, StoreError> {
        let mut challenges = self.challenges.lock().unwrap();
        let before = challenges.len();
        challenges.retain(|_, c| c.is_usable(now));
        Ok((before - challenges.len()) as u64)
    }
}

impl BindingStore for NullStore {
    fn get_binding(&self, identity: &Identity) -> Result<Option<Binding>, StoreError> {
        Ok(self.bindings.lock().unwrap().get(identity.as_str()).cloned())
    }

    fn find_by_wallet(&self, wallet: &WalletAddress) -> Result<Option<Binding>, StoreError> {
        Ok(self
            .bindings
            .lock()
            .unwrap()
            .values()
            .find(|b| b.wallet == *wallet)
            .cloned())
    }

    fn commit_binding(&self, binding: &Binding) -> Result<(), StoreError> {
        // Check and write under one lock: this is the atomic
        // insert-if-wallet-unbound primitive.
        let mut bindings = self.bindings.lock().unwrap();
        if let Some(holder) = bindings
            .values()
            .find(|b| b.wallet == binding.wallet && b.identity != binding.identity)
        {
            return Err(StoreError::Conflict(holder.identity.to_string()));
        }
        bindings.insert(binding.identity.as_str().to_string(), binding.clone());
        Ok(())
    }

    fn set_verified(
        &self,
        identity: &Identity,
        verified: bool,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let mut bindings = self.bindings.lock().unwrap();
        match bindings.get_mut(identity.as_str()) {
            Some(binding) => {
                binding.verified = verified;
                binding.last_checked_at = now;
                Ok(())
            }
            None => Err(StoreError::NotFound(identity.to_string())),
        }
    }

    fn list_verified(&self) -> Result<Vec<Binding>, StoreError> {
        Ok(self
            .bindings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.verified)
            .cloned()
            .collect())
    }
}

impl RateLimitStore for NullStore {
    fn record_action(&self, record: &RateRecord) -> Result<(), StoreError> {
        self.rate_log.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn count_actions_since(
        &self,
        identity: &Identity,
        action: &str,
        since: Timestamp,
    ) -> Result<u64, StoreError> {
        Ok(self
            .rate_log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.identity == *identity && r.action == action && r.timestamp > since)
            .count() as u64)
    }

    fn purge_actions_before(&self, cutoff: Timestamp) -> Result<u64, StoreError> {
        let mut log = self.rate_log.lock().unwrap();
        let before = log.len();
        log.retain(|r| r.timestamp >= cutoff);
        Ok((before - log.len()) as u64)
    }
}

impl AuditStore for NullStore {
    fn append_audit(&self, entry: &AuditEntry) -> Result<(), StoreError> {
        self.audit_log.lock().unwrap().push(entry.clone());
        Ok(())
    }

    fn recent_audits(&self, limit: usize) -> Result<Vec<AuditEntry>, StoreError> {
        Ok(self
            .audit_log
            .lock()
            .unwrap()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    fn audits_for_identity(
        &self,
        identity: &Identity,
        limit: usize,
    ) -> Result<Vec<AuditEntry>, StoreError> {
        Ok(self
            .audit_log
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|e| e.identity == *identity)
            .take(limit)
            .cloned()
            .collect())
    }
}

impl GateStore for NullStore {
    type Challenges = Self;
    type Bindings = Self;
    type RateLog = Self;
    type Audit = Self;

    fn challenges(&self) -> &Self {
        self
    }

    fn bindings(&self) -> &Self {
        self
    }

    fn rate_log(&self) -> &Self {
        self
    }

    fn audit(&self) -> &Self {
        self
    }
}
