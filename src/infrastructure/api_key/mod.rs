//! API Key infrastructure implementations
//!
//! Credential hashing, the administrative key stores, and the verification
//! service that ties them together.

mod hasher;
mod in_memory;
mod postgres_repository;
mod service;

pub use hasher::hash_credential;
pub use in_memory::InMemoryAdminKeyStore;
pub use postgres_repository::PostgresAdminKeyStore;
pub use service::{parse_bearer, CredentialVerifier, Verification, BEARER_PREFIX};
