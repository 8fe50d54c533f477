//! Verification service — orchestrates the rate limiter, challenge engine,
//! signature check, and ownership oracle into the caller-facing API, and
//! enforces the binding invariants when committing an outcome.

use crate::challenge::ChallengeEngine;
use crate::error::VerifyError;
use crate::outcome::{
    CleanupReport, ReVerifyDetail, ReVerifyReport, ReVerifyStatus, VerifiedOutcome,
};
use crate::rate_limiter::{RateAction, RateLimiter};
use tokengate_crypto::{verify_signer, SignedPayload};
use tokengate_oracle::{OracleError, Ownership, OwnershipOracle};
use tokengate_store::{
    AuditEntry, AuditStore, Binding, BindingStore, Challenge, GateStore, RateLimitStore,
    StoreError,
};
use tokengate_types::{GateParams, Identity, Timestamp, WalletAddress};

/// The verification state machine.
///
/// One logical session per identity at a time: a new `start_verification`
/// supersedes the identity's previous unused challenge. Identities verify
/// independently; the only shared state is the store, which serializes
/// conflicting binding writes.
pub struct VerificationService<S: GateStore, O: OwnershipOracle> {
    params: GateParams,
    limiter: RateLimiter,
    challenges: ChallengeEngine,
    store: S,
    oracle: O,
}

impl<S: GateStore, O: OwnershipOracle> VerificationService<S, O> {
    pub fn new(params: GateParams, store: S, oracle: O) -> Self {
        let limiter = RateLimiter::new(
            params.rate_limit_window_secs,
            params.rate_limit_max_requests,
        );
        Self {
            params,
            limiter,
            challenges: ChallengeEngine,
            store,
            oracle,
        }
    }

    pub fn params(&self) -> &GateParams {
        &self.params
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Start a verification session: issue a fresh one-time challenge.
    ///
    /// Any prior unused challenge for the identity is superseded, so no two
    /// challenges for the same identity are simultaneously usable.
    pub fn start_verification(
        &self,
        identity: &Identity,
        now: Timestamp,
    ) -> Result<Challenge, VerifyError> {
        if !self
            .limiter
            .allow(self.store.rate_log(), identity, RateAction::VerifyStart, now)
        {
            self.audit(identity, "verification_failed", Some("rate limited".into()), now);
            return Err(VerifyError::RateLimited);
        }
        self.limiter
            .record(self.store.rate_log(), identity, RateAction::VerifyStart, now);

        // Opportunistic housekeeping; correctness never depends on it.
        self.challenges.cleanup(self.store.challenges(), now)?;

        let challenge = self
            .challenges
            .issue(self.store.challenges(), identity, &self.params, now)?;

        self.audit(identity, "verification_started", None, now);
        tracing::info!(
            identity = %identity,
            challenge = %challenge.id,
            "verification started"
        );
        Ok(challenge)
    }

    /// Complete a verification session with a signed challenge.
    ///
    /// Steps, in order, each a rejection point: challenge lookup, payload
    /// parse, signature check, challenge consumption (before anything
    /// externally observable, so a signature can never be replayed),
    /// wallet-exclusivity check, ownership check, atomic binding commit.
    pub fn complete_verification(
        &self,
        identity: &Identity,
        challenge_id: &str,
        payload_text: &str,
        now: Timestamp,
    ) -> Result<VerifiedOutcome, VerifyError> {
        if !self.limiter.allow(
            self.store.rate_log(),
            identity,
            RateAction::VerifyComplete,
            now,
        ) {
            self.audit(identity, "verification_failed", Some("rate limited".into()), now);
            return Err(VerifyError::RateLimited);
        }
        self.limiter.record(
            self.store.rate_log(),
            identity,
            RateAction::VerifyComplete,
            now,
        );

        let challenge = self
            .challenges
            .find_usable(self.store.challenges(), challenge_id, now)?
            .filter(|c| c.identity == *identity);
        let Some(challenge) = challenge else {
            self.audit(
                identity,
                "verification_failed",
                Some("invalid or expired challenge".into()),
                now,
            );
            return Err(VerifyError::ChallengeInvalidOrExpired);
        };

        let payload = match SignedPayload::parse(payload_text) {
            Ok(payload) => payload,
            Err(e) => {
                self.audit(
                    identity,
                    "verification_failed",
                    Some("invalid signature format".into()),
                    now,
                );
                return Err(e.into());
            }
        };

        let Some(wallet) = verify_signer(&challenge.message, &payload) else {
            self.audit(
                identity,
                "verification_failed",
                Some("invalid signature".into()),
                now,
            );
            return Err(VerifyError::SignatureInvalid);
        };

        // Single-use enforcement: consume before the exclusivity and
        // ownership checks, so retrying with the same payload after a later
        // rejection cannot replay the signature.
        self.challenges.consume(self.store.challenges(), challenge_id)?;

        if let Some(existing) = self.store.bindings().find_by_wallet(&wallet)? {
            if existing.identity != *identity {
                self.audit(
                    identity,
                    "verification_failed",
                    Some(format!("wallet {wallet} already linked to {}", existing.identity)),
                    now,
                );
                return Err(VerifyError::WalletAlreadyLinked(wallet));
            }
        }

        let ownership = self.check_ownership_with_retry(identity, &wallet, now)?;
        if !ownership.owns {
            self.audit(
                identity,
                "verification_failed",
                Some(format!("no qualifying tokens for wallet {wallet}")),
                now,
            );
            return Err(VerifyError::NoQualifyingTokens(wallet));
        }

        let binding = Binding {
            identity: identity.clone(),
            wallet: wallet.clone(),
            verified: true,
            verified_at: now,
            last_checked_at: now,
        };
        match self.store.bindings().commit_binding(&binding) {
            Ok(()) => {}
            // Lost the commit race for this wallet to another identity.
            Err(StoreError::Conflict(holder)) => {
                self.audit(
                    identity,
                    "verification_failed",
                    Some(format!("wallet {wallet} already linked to {holder}")),
                    now,
                );
                return Err(VerifyError::WalletAlreadyLinked(wallet));
            }
            Err(e) => return Err(e.into()),
        }

        let detail = serde_json::json!({
            "wallet": wallet,
            "token_count": ownership.count,
        });
        self.audit(identity, "verification_completed", Some(detail.to_string()), now);
        tracing::info!(
            identity = %identity,
            wallet = %wallet,
            token_count = ownership.count,
            "verification completed"
        );

        Ok(VerifiedOutcome {
            wallet,
            token_count: ownership.count,
        })
    }

    /// Current binding for an identity, if any.
    pub fn status(&self, identity: &Identity) -> Result<Option<Binding>, VerifyError> {
        Ok(self.store.bindings().get_binding(identity)?)
    }

    /// Soft-revoke one identity's verification. Returns `false` if the
    /// identity has no binding. The record is retained.
    pub fn revoke(&self, identity: &Identity, now: Timestamp) -> Result<bool, VerifyError> {
        let Some(binding) = self.store.bindings().get_binding(identity)? else {
            return Ok(false);
        };
        self.store.bindings().set_verified(identity, false, now)?;
        self.audit(
            identity,
            "verification_revoked",
            Some(format!("wallet: {}", binding.wallet)),
            now,
        );
        tracing::info!(identity = %identity, wallet = %binding.wallet, "verification revoked");
        Ok(true)
    }

    /// All currently-verified bindings.
    pub fn verified_bindings(&self) -> Result<Vec<Binding>, VerifyError> {
        Ok(self.store.bindings().list_verified()?)
    }

    /// Re-check on-chain ownership for every verified binding.
    ///
    /// Sequential, no lock held across the oracle call, and not atomic
    /// across users: a crash mid-sweep leaves some bindings re-checked and
    /// others not, which is fine because each re-check is independently
    /// idempotent. Zero tokens soft-revokes; an oracle failure leaves the
    /// binding untouched and counts an error.
    pub fn re_verify_all(&self, now: Timestamp) -> Result<ReVerifyReport, VerifyError> {
        let verified = self.store.bindings().list_verified()?;
        let mut report = ReVerifyReport {
            total: verified.len() as u64,
            ..ReVerifyReport::default()
        };

        tracing::info!(total = report.total, "starting bulk re-verification");

        for binding in verified {
            let status = match self.oracle.check_ownership(&binding.wallet) {
                Ok(ownership) if ownership.owns => {
                    match self
                        .store
                        .bindings()
                        .set_verified(&binding.identity, true, now)
                    {
                        Ok(()) => {
                            report.still_valid += 1;
                            ReVerifyStatus::StillValid {
                                token_count: ownership.count,
                            }
                        }
                        Err(e) => {
                            report.errors += 1;
                            ReVerifyStatus::Error(e.to_string())
                        }
                    }
                }
                Ok(_) => match self
                    .store
                    .bindings()
                    .set_verified(&binding.identity, false, now)
                {
                    Ok(()) => {
                        report.revoked += 1;
                        self.audit(
                            &binding.identity,
                            "verification_revoked_update",
                            Some("no qualifying tokens found during update check".into()),
                            now,
                        );
                        ReVerifyStatus::Revoked
                    }
                    Err(e) => {
                        report.errors += 1;
                        ReVerifyStatus::Error(e.to_string())
                    }
                },
                Err(e) => {
                    report.errors += 1;
                    tracing::warn!(
                        identity = %binding.identity,
                        wallet = %binding.wallet,
                        error = %e,
                        "re-verification check failed, binding left untouched"
                    );
                    ReVerifyStatus::Error(e.to_string())
                }
            };

            report.details.push(ReVerifyDetail {
                identity: binding.identity,
                wallet: binding.wallet,
                status,
            });
        }

        let summary = serde_json::json!({
            "total": report.total,
            "still_valid": report.still_valid,
            "revoked": report.revoked,
            "errors": report.errors,
        });
        self.audit(
            &Identity::system(),
            "bulk_reverification_completed",
            Some(summary.to_string()),
            now,
        );
        tracing::info!(
            total = report.total,
            still_valid = report.still_valid,
            revoked = report.revoked,
            errors = report.errors,
            "bulk re-verification completed"
        );

        Ok(report)
    }

    /// Explicit maintenance pass, triggered by whatever scheduler the host
    /// provides: purge used/expired challenges and stale rate records.
    pub fn cleanup_expired(&self, now: Timestamp) -> Result<CleanupReport, VerifyError> {
        let challenges_purged = self.challenges.cleanup(self.store.challenges(), now)?;
        let cutoff = now.minus_secs(self.params.rate_retention_secs);
        let rate_records_purged = self.store.rate_log().purge_actions_before(cutoff)?;

        if challenges_purged > 0 || rate_records_purged > 0 {
            tracing::info!(
                challenges_purged,
                rate_records_purged,
                "cleaned up expired records"
            );
        }
        Ok(CleanupReport {
            challenges_purged,
            rate_records_purged,
        })
    }

    /// One retry on a transient oracle failure; access-restricted and the
    /// second transient failure reject immediately.
    fn check_ownership_with_retry(
        &self,
        identity: &Identity,
        wallet: &WalletAddress,
        now: Timestamp,
    ) -> Result<Ownership, VerifyError> {
        let first = match self.oracle.check_ownership(wallet) {
            Ok(ownership) => return Ok(ownership),
            Err(e) => e,
        };

        if let OracleError::AccessRestricted = first {
            self.audit(
                identity,
                "verification_failed",
                Some("collection requires a viewing credential".into()),
                now,
            );
            return Err(VerifyError::AccessRestricted);
        }

        tracing::warn!(
            identity = %identity,
            wallet = %wallet,
            error = %first,
            "ownership query unavailable, retrying once"
        );
        match self.oracle.check_ownership(wallet) {
            Ok(ownership) => Ok(ownership),
            Err(OracleError::AccessRestricted) => {
                self.audit(
                    identity,
                    "verification_failed",
                    Some("collection requires a viewing credential".into()),
                    now,
                );
                Err(VerifyError::AccessRestricted)
            }
            Err(OracleError::Unavailable(reason)) => {
                self.audit(
                    identity,
                    "verification_failed",
                    Some(format!("ownership check unavailable: {reason}")),
                    now,
                );
                Err(VerifyError::OwnershipCheckFailed(reason))
            }
        }
    }

    /// Append an audit entry. Auditing never fails the operation it
    /// records; a failed append is logged and dropped.
    fn audit(&self, identity: &Identity, action: &str, detail: Option<String>, now: Timestamp) {
        let entry = AuditEntry {
            identity: identity.clone(),
            action: action.to_string(),
            detail,
            timestamp: now,
        };
        if let Err(e) = self.store.audit().append_audit(&entry) {
            tracing::warn!(
                identity = %identity,
                action,
                error = %e,
                "audit append failed"
            );
        }
    }
}
