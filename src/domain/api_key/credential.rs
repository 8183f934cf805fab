//! Presented credentials and their stored digest form

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// Opaque secret presented by a caller.
///
/// Lives for a single request. The `Debug` output never contains the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Raw secret bytes, for hashing only
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// One-way digest of a [`Credential`], lowercase hex.
///
/// This is the only form of a secret that is persisted or compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CredentialDigest(String);

impl CredentialDigest {
    /// Build a digest from raw SHA-256 output
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse a stored hex digest
    pub fn from_hex(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.len() != DIGEST_HEX_LEN {
            return Err(DomainError::validation(format!(
                "Digest must be {} hex characters, got {}",
                DIGEST_HEX_LEN,
                value.len()
            )));
        }

        if !value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(DomainError::validation(
                "Digest must be lowercase hexadecimal",
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading characters of the digest, safe to put in logs
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl TryFrom<String> for CredentialDigest {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(value)
    }
}

impl From<CredentialDigest> for String {
    fn from(digest: CredentialDigest) -> Self {
        digest.0
    }
}

impl std::fmt::Display for CredentialDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("sk_live_abc123");
        let debug = format!("{:?}", credential);

        assert!(!debug.contains("sk_live_abc123"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_digest_from_hex_valid() {
        let digest = CredentialDigest::from_hex(EMPTY_SHA256).unwrap();
        assert_eq!(digest.as_str(), EMPTY_SHA256);
        assert_eq!(digest.short(), "e3b0c442");
    }

    #[test]
    fn test_digest_from_hex_wrong_length() {
        assert!(CredentialDigest::from_hex("abc").is_err());
        assert!(CredentialDigest::from_hex("").is_err());
    }

    #[test]
    fn test_digest_from_hex_rejects_uppercase() {
        let upper = EMPTY_SHA256.to_uppercase();
        assert!(CredentialDigest::from_hex(upper).is_err());
    }

    #[test]
    fn test_digest_from_bytes() {
        let digest = CredentialDigest::from_bytes([0xab; 32]);
        assert_eq!(digest.as_str(), "ab".repeat(32));
    }
}
