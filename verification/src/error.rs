use thiserror::Error;
use tokengate_crypto::PayloadError;
use tokengate_store::StoreError;
use tokengate_types::WalletAddress;

/// Every way a verification request can be rejected.
///
/// Display strings double as the guidance the transport layer relays to
/// the requester.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("rate limit exceeded, please wait before trying again")]
    RateLimited,

    #[error("invalid or expired challenge, please start verification again")]
    ChallengeInvalidOrExpired,

    #[error("invalid signature format, please copy the complete response from your wallet: {0}")]
    SignatureFormatInvalid(#[from] PayloadError),

    #[error(
        "signature verification failed, make sure you signed the exact challenge message with the right account"
    )]
    SignatureInvalid,

    #[error("wallet {0} is already linked to another account")]
    WalletAlreadyLinked(WalletAddress),

    #[error(
        "this collection requires a viewing credential for verification, please use the credential path"
    )]
    AccessRestricted,

    #[error("no qualifying tokens found in wallet {0}")]
    NoQualifyingTokens(WalletAddress),

    #[error("unable to check token ownership right now, please try again later: {0}")]
    OwnershipCheckFailed(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl VerifyError {
    /// Transient rejections are safe to retry. Retrying `complete` with the
    /// same challenge only works if the challenge was not yet consumed;
    /// otherwise the caller must restart the flow.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::OwnershipCheckFailed(_) | Self::Store(StoreError::Unavailable(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_kinds() {
        assert!(VerifyError::OwnershipCheckFailed("timeout".into()).is_transient());
        assert!(VerifyError::Store(StoreError::Unavailable("db down".into())).is_transient());
    }

    #[test]
    fn hard_rejections_are_not_transient() {
        assert!(!VerifyError::RateLimited.is_transient());
        assert!(!VerifyError::ChallengeInvalidOrExpired.is_transient());
        assert!(!VerifyError::SignatureInvalid.is_transient());
        assert!(!VerifyError::Store(StoreError::NotFound("x".into())).is_transient());
    }
}
