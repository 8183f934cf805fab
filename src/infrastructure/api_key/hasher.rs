//! Credential hashing

use sha2::{Digest, Sha256};

use crate::domain::api_key::{Credential, CredentialDigest};

/// Hash a credential for lookup.
///
/// SHA-256 over the raw secret bytes, hex encoded. Keys are high-entropy
/// random tokens, so no salt is used; the digest must be reproducible for the
/// indexed lookup to work.
pub fn hash_credential(credential: &Credential) -> CredentialDigest {
    let mut hasher = Sha256::new();
    hasher.update(credential.as_bytes());
    CredentialDigest::from_bytes(hasher.finalize().into())
}
