//! Wire types for the registry HTTP API

pub mod error;
pub mod registry;

pub use error::{ApiError, ApiErrorResponse};
pub use registry::{AuthCheckResponse, PublisherResponse};
