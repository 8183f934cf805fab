//! Domain layer - Core business logic and entities

pub mod api_key;
pub mod error;
pub mod publisher;

pub use api_key::{
    AdminKeyStore, ApiKeyId, ApiKeyRecord, AuthError, Credential, CredentialDigest,
    ResolvedApiKey,
};
pub use error::DomainError;
pub use publisher::{Publisher, PublisherId};
