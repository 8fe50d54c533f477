//! Requester identity — the chat platform's opaque user id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque requester identity, assigned by the external chat platform.
///
/// The protocol never inspects the contents; it is a stable lookup key for
/// challenges, bindings, rate records, and audit entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Reserved identity used for system-initiated audit entries
    /// (bulk maintenance operations that act on behalf of no single user).
    pub const SYSTEM: &'static str = "system";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The system identity for maintenance audit entries.
    pub fn system() -> Self {
        Self(Self::SYSTEM.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}
