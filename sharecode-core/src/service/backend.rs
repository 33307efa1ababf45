//! Service trait definition
//!
//! This module defines the `Service` trait that every code-sharing backend
//! implements.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::host::Host;
use crate::models::Snippet;

/// Abstraction over code-sharing backends
///
/// Implementations are independent of each other. Each owns its own
/// `ServiceConfiguration` scoped to its name, and its anonymity is fixed
/// when it is constructed.
#[async_trait]
pub trait Service: Send + Sync {
    /// Publish a snippet
    ///
    /// # Returns
    /// The URL of the published content
    ///
    /// # Errors
    /// Returns `ServiceError` on network, authentication or quota failures.
    /// Nothing is retried.
    async fn upload(&self, snippet: Snippet) -> ServiceResult<String>;

    /// Let the user pick a previously published item and show it
    ///
    /// The item is staged on local disk before it is handed to the host's
    /// viewer.
    ///
    /// # Returns
    /// Path of the staged file that was shown, `None` if the user cancelled
    /// or there was nothing to pick
    ///
    /// # Errors
    /// Returns `ServiceError` on remote failures or when staging fails
    async fn open(&self, host: &Host) -> ServiceResult<Option<PathBuf>>;

    /// Whether configuration required by this instance's mode is missing
    fn is_not_configured(&self) -> bool;

    /// Whether this instance publishes without stored credentials
    fn is_anonymous(&self) -> bool;
}
