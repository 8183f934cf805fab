//! Publisher domain
//!
//! Publishers are the principals that registry API keys authenticate as.

mod entity;

pub use entity::{Publisher, PublisherId};
