//! API Key domain
//!
//! Types and traits for verifying registry API keys. Keys are issued out of
//! band; this domain only resolves a presented credential to its publisher and
//! records when a key was last used.

mod credential;
mod entity;
mod error;
mod repository;

pub use credential::{Credential, CredentialDigest, DIGEST_HEX_LEN};
pub use entity::{ApiKeyId, ApiKeyRecord, ResolvedApiKey};
pub use error::AuthError;
pub use repository::AdminKeyStore;

#[cfg(test)]
pub use repository::MockAdminKeyStore;
