//! Nullable ownership oracle — pre-programmed on-chain answers.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokengate_oracle::{ContractMetadata, OracleError, Ownership, OwnershipOracle};
use tokengate_types::WalletAddress;

/// A deterministic ownership oracle for testing.
///
/// Per-wallet answers are programmed up front: one-shot failures are
/// consumed first (in order), then the sticky ownership answer applies.
/// Wallets with no programmed answer own nothing. Every call is counted,
/// so tests can assert retry behavior.
pub struct NullOracle {
    sticky: Mutex<HashMap<String, Ownership>>,
    queued_failures: Mutex<HashMap<String, VecDeque<OracleError>>>,
    metadata: Mutex<ContractMetadata>,
    calls: Mutex<u64>,
}

impl NullOracle {
    pub fn new() -> Self {
        Self {
            sticky: Mutex::new(HashMap::new()),
            queued_failures: Mutex::new(HashMap::new()),
            metadata: Mutex::new(ContractMetadata {
                name: "Null Collection".to_string(),
                symbol: "NULL".to_string(),
                total_supply: 0,
            }),
            calls: Mutex::new(0),
        }
    }

    /// Make `wallet` own `count` tokens from now on.
    pub fn grant(&self, wallet: &WalletAddress, count: u32) {
        self.sticky
            .lock()
            .unwrap()
            .insert(wallet.as_str().to_string(), Ownership::with_count(count));
    }

    /// Make `wallet` own nothing from now on.
    pub fn deny(&self, wallet: &WalletAddress) {
        self.sticky
            .lock()
            .unwrap()
            .insert(wallet.as_str().to_string(), Ownership::NONE);
    }

    /// Queue a one-shot failure for `wallet`, consumed before the sticky
    /// answer. Multiple queued failures are returned in order.
    pub fn fail_next(&self, wallet: &WalletAddress, error: OracleError) {
        self.queued_failures
            .lock()
            .unwrap()
            .entry(wallet.as_str().to_string())
            .or_default()
            .push_back(error);
    }

    /// Replace the contract metadata answer.
    pub fn set_metadata(&self, metadata: ContractMetadata) {
        *self.metadata.lock().unwrap() = metadata;
    }

    /// How many ownership queries have been made.
    pub fn calls(&self) -> u64 {
        *self.calls.lock().unwrap()
    }
}

impl Default for NullOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnershipOracle for NullOracle {
    fn check_ownership(&self, wallet: &WalletAddress) -> Result<Ownership, OracleError> {
        *self.calls.lock().unwrap() += 1;

        if let Some(queue) = self
            .queued_failures
            .lock()
            .unwrap()
            .get_mut(wallet.as_str())
        {
            if let Some(error) = queue.pop_front() {
                return Err(error);
            }
        }

        Ok(self
            .sticky
            .lock()
            .unwrap()
            .get(wallet.as_str())
            .copied()
            .unwrap_or(Ownership::NONE))
    }

    fn contract_metadata(&self) -> Result<ContractMetadata, OracleError> {
        Ok(self.metadata.lock().unwrap().clone())
    }

    fn name(&self) -> &str {
        "null-oracle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(tag: &str) -> WalletAddress {
        WalletAddress::new(format!("secret1{tag}"))
    }

    #[test]
    fn unknown_wallet_owns_nothing() {
        let oracle = NullOracle::new();
        assert_eq!(
            oracle.check_ownership(&wallet("x")).unwrap(),
            Ownership::NONE
        );
    }

    #[test]
    fn grant_and_deny_are_sticky() {
        let oracle = NullOracle::new();
        let w = wallet("x");
        oracle.grant(&w, 2);
        assert_eq!(
            oracle.check_ownership(&w).unwrap(),
            Ownership::with_count(2)
        );
        assert_eq!(
            oracle.check_ownership(&w).unwrap(),
            Ownership::with_count(2)
        );
        oracle.deny(&w);
        assert_eq!(oracle.check_ownership(&w).unwrap(), Ownership::NONE);
    }

    #[test]
    fn queued_failures_consumed_in_order_before_sticky() {
        let oracle = NullOracle::new();
        let w = wallet("x");
        oracle.grant(&w, 1);
        oracle.fail_next(&w, OracleError::Unavailable("first".into()));
        oracle.fail_next(&w, OracleError::AccessRestricted);

        assert_eq!(
            oracle.check_ownership(&w),
            Err(OracleError::Unavailable("first".into()))
        );
        assert_eq!(
            oracle.check_ownership(&w),
            Err(OracleError::AccessRestricted)
        );
        assert_eq!(
            oracle.check_ownership(&w).unwrap(),
            Ownership::with_count(1)
        );
    }

    #[test]
    fn failures_are_per_wallet() {
        let oracle = NullOracle::new();
        oracle.fail_next(&wallet("a"), OracleError::AccessRestricted);
        assert!(oracle.check_ownership(&wallet("b")).is_ok());
        assert!(oracle.check_ownership(&wallet("a")).is_err());
    }

    #[test]
    fn calls_are_counted() {
        let oracle = NullOracle::new();
        assert_eq!(oracle.calls(), 0);
        let _ = oracle.check_ownership(&wallet("a"));
        let _ = oracle.check_ownership(&wallet("a"));
        assert_eq!(oracle.calls(), 2);
    }
}
