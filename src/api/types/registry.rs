//! Registry authentication-check payloads

use serde::{Deserialize, Serialize};

use crate::domain::Publisher;

/// Successful authentication check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCheckResponse {
    pub authenticated: bool,
    pub publisher: PublisherResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherResponse {
    pub id: String,
    pub display_name: String,
}

impl From<&Publisher> for PublisherResponse {
    fn from(publisher: &Publisher) -> Self {
        Self {
            id: publisher.id().as_str().to_string(),
            display_name: publisher.display_name().to_string(),
        }
    }
}

impl AuthCheckResponse {
    pub fn authenticated(publisher: &Publisher) -> Self {
        Self {
            authenticated: true,
            publisher: publisher.into(),
        }
    }
}
