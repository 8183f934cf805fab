//! API middleware components

pub mod auth;
pub mod logging;

pub use auth::RequirePublisher;
pub use logging::logging_middleware;
