//! Centralized error types for bundle-refresh
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.

use thiserror::Error;

/// Top-level error type for a refresh run
///
/// Every variant here aborts the run. Registry lookups never surface as
/// `RefreshError`; they are downgraded to warnings by the refresh service.
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("Failed to read pipeline file: {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write pipeline file: {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid bundle reference pattern for prefix {prefix}")]
    Pattern {
        prefix: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to build registry HTTP client")]
    Client(#[source] reqwest::Error),
}

/// Container registry lookup errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Registry returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Unexpected response body from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("No non-expired tag with a manifest digest")]
    NoQualifyingDigest,

    #[error("Malformed manifest digest: {value}")]
    MalformedDigest { value: String },
}
