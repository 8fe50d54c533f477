use thiserror::Error;

/// Classified failure modes of the on-chain ownership query.
///
/// Classification happens once, here at the boundary; callers never parse
/// error strings to decide what went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The collection requires a viewing credential the requester has not
    /// supplied. Not retryable without the credential.
    #[error("ownership cannot be determined without a viewing credential")]
    AccessRestricted,

    /// Transient failure (network, timeout). Eligible for a single retry.
    #[error("ownership query unavailable: {0}")]
    Unavailable(String),
}

impl OracleError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
