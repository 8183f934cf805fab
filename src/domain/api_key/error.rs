//! Authentication failures

use thiserror::Error;

/// Outcome of a failed credential verification.
///
/// The two credential faults intentionally carry no detail about which lookup
/// branch rejected the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing or invalid Authorization header")]
    MissingOrMalformedCredential,

    #[error("Invalid token")]
    InvalidCredential,

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    /// Only ever logged; the caller never sees this
    #[error("Failed to record API key usage: {0}")]
    AuditWriteFailed(String),
}

impl AuthError {
    /// Whether the caller presented a bad credential, as opposed to an infrastructure fault
    pub fn is_credential_fault(&self) -> bool {
        matches!(
            self,
            Self::MissingOrMalformedCredential | Self::InvalidCredential
        )
    }
}
