//! Code-sharing services for `ShareCode`
//!
//! This module provides the `Service` trait and its backends:
//! - Pastebin (anonymous and authenticated)
//! - GitHub gists (anonymous and authenticated)
//! - GitLab snippets (authenticated)
//!
//! The `BuiltinCatalog` enumerates them and `rank_candidates` orders them for
//! the picker.

mod backend;
mod catalog;
pub mod github;
pub mod gitlab;
mod http;
pub mod pastebin;

pub use backend::Service;
pub use catalog::{rank_candidates, BuiltinCatalog, ServiceCatalog, ServiceDescriptor, ServiceKind};
pub use github::GithubService;
pub use gitlab::GitlabService;
pub use pastebin::PastebinService;
