//! Typed errors for the sales service
//!
//! # Error Categories
//!
//! - [`StoreError`]: failures talking to the data store, raised by repositories
//! - [`SaleError`]: service-level failures, one per operation family
//! - [`ConfigError`]: configuration loading and validation
//!
//! Repositories return [`StoreError`] unchanged to the service. The service
//! logs the store failure and wraps it into a [`SaleError`] whose `Display`
//! is generic so nothing store-specific reaches HTTP clients.
//! The underlying cause stays reachable through [`std::error::Error::source`].
//!
//! Not-found is not an error anywhere in this hierarchy: lookups return
//! `Option` and deletes return `bool`.

use thiserror::Error;

/// Errors raised by a [`SaleRepository`](crate::core::SaleRepository)
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the request
    #[error("{operation} failed: {message}")]
    Backend { operation: String, message: String },

    /// A record could not be converted to or from the store format
    #[error("failed to convert sale record: {message}")]
    Serialization { message: String },

    /// The store did not answer within the configured budget
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },
}

impl StoreError {
    pub fn backend(operation: impl Into<String>, message: impl ToString) -> Self {
        StoreError::Backend {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        StoreError::Serialization {
            message: message.to_string(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Backend { .. } => "STORE_BACKEND_ERROR",
            StoreError::Serialization { .. } => "STORE_SERIALIZATION_ERROR",
            StoreError::Timeout { .. } => "STORE_TIMEOUT",
        }
    }
}

/// Errors raised by the [`SaleService`](crate::core::SaleService)
#[derive(Debug, Error)]
pub enum SaleError {
    #[error("Error creating sale")]
    CreationFailed(#[source] StoreError),

    /// Single-sale lookup by id
    #[error("Failed to retrieve sale")]
    LookupFailed(#[source] StoreError),

    #[error("Failed to retrieve sales")]
    RetrievalFailed(#[source] StoreError),

    #[error("Failed to delete sale")]
    DeletionFailed(#[source] StoreError),
}

impl SaleError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SaleError::CreationFailed(_) => "SALE_CREATION_FAILED",
            SaleError::LookupFailed(_) => "SALE_LOOKUP_FAILED",
            SaleError::RetrievalFailed(_) => "SALE_RETRIEVAL_FAILED",
            SaleError::DeletionFailed(_) => "SALE_DELETION_FAILED",
        }
    }

    /// The store failure behind this error
    pub fn store_error(&self) -> &StoreError {
        match self {
            SaleError::CreationFailed(e)
            | SaleError::LookupFailed(e)
            | SaleError::RetrievalFailed(e)
            | SaleError::DeletionFailed(e) => e,
        }
    }
}

/// Errors raised while loading [`ServiceConfig`](crate::config::ServiceConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }
}
