//! Challenge-response wallet verification.
//!
//! The flow, each step a possible rejection point:
//! 1. **Rate Limiter** gates the request (trailing window per identity+action).
//! 2. **Challenge Engine** issues or consumes a one-time challenge.
//! 3. **Signature check** validates the signed payload and recovers the
//!    signer's wallet address.
//! 4. **Ownership Oracle** confirms the wallet holds qualifying tokens.
//! 5. The **Verification Service** commits the identity↔wallet binding,
//!    enforcing wallet exclusivity atomically at the store.
//!
//! The protocol faces adversarial input repeatedly over time: every failure
//! degrades to a typed rejection, never a crash, and every transition is
//! audited.

pub mod challenge;
pub mod error;
pub mod outcome;
pub mod rate_limiter;
pub mod service;

pub use challenge::ChallengeEngine;
pub use error::VerifyError;
pub use outcome::{CleanupReport, ReVerifyDetail, ReVerifyReport, ReVerifyStatus, VerifiedOutcome};
pub use rate_limiter::{RateAction, RateLimiter};
pub use service::VerificationService;
