//! Infrastructure layer - Store, hashing and runtime implementations

pub mod api_key;
pub mod logging;
pub mod storage;
