//! Application state for shared services

use std::sync::Arc;

use crate::domain::AdminKeyStore;
use crate::infrastructure::api_key::CredentialVerifier;

/// Application state shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub credential_verifier: Arc<CredentialVerifier>,
}

impl AppState {
    /// Build state around an administrative key store
    pub fn new(store: Arc<dyn AdminKeyStore>) -> Self {
        Self {
            credential_verifier: Arc::new(CredentialVerifier::new(store)),
        }
    }
}
