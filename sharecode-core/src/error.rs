//! Error types for `ShareCode`
//!
//! This module defines the error types used throughout the core library,
//! covering configuration access, service uploads and retrievals, and
//! staging-area filesystem operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to configuration access and persistence
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A key outside the fixed per-service key set was requested
    #[error("Unknown configuration key: {0} (expected username, authtoken or baseurl)")]
    UnknownKey(String),

    /// Failed to parse configuration file
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to write configuration file
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// The backing store rejected an update
    #[error("Failed to persist {scope}.{key}: {reason}")]
    Persist {
        /// Scope the update targeted
        scope: String,
        /// Key the update targeted
        key: String,
        /// Why the store failed
        reason: String,
    },
}

/// Errors reported by a remote code-sharing service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The service refused the credentials
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The service refused because of rate limits or account quota
    #[error("Quota exceeded: {0}")]
    Quota(String),

    /// The service answered with an unexpected status
    #[error("Request rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the service
        body: String,
    },

    /// The response could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Required configuration for this service is missing
    #[error("Service not configured: {0}")]
    NotConfigured(String),

    /// Retrieved content could not be staged locally
    #[error(transparent)]
    Staging(#[from] StagingError),

    /// The host could not show the staged file
    #[error("Failed to show staged file: {0}")]
    Viewer(#[source] std::io::Error),
}

/// Errors related to the local staging area
#[derive(Debug, Error)]
pub enum StagingError {
    /// The item id would not stay inside the namespace directory
    #[error("Invalid item id for staging: {0:?}")]
    InvalidItemId(String),

    /// Failed to create a staging directory
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to write a staged file
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Result type alias for staging operations
pub type StagingResult<T> = std::result::Result<T, StagingError>;
