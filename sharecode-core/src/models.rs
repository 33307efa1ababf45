//! Core data models for `ShareCode`

mod snippet;

pub use snippet::{Snippet, FALLBACK_FILE_NAME};
