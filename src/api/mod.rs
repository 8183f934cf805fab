//! API layer - HTTP endpoints and middleware

pub mod health;
pub mod middleware;
pub mod registry;
pub mod router;
pub mod state;
pub mod types;

pub use middleware::RequirePublisher;
pub use router::{create_router, REGISTRY_PREFIX};
pub use state::AppState;
