//! Publisher entity

use serde::{Deserialize, Serialize};

/// Publisher identifier as issued by the registry account system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublisherId(String);

impl PublisherId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PublisherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account that owns one or more registry API keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    id: PublisherId,
    display_name: String,
}

impl Publisher {
    pub fn new(id: PublisherId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    pub fn id(&self) -> &PublisherId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
