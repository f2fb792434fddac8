//! IOS-XE client errors

use thiserror::Error;

/// Errors that can occur when talking to a device's RESTCONF API
///
/// Write operations never produce [`DeviceError::Api`]; they hand the raw
/// [`DeviceResponse`](crate::DeviceResponse) back to the caller instead.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Transport failure (connect, DNS, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Device answered a read with a non-success status
    #[error("RESTCONF API error: {status} - {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body as returned by the device
        body: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client could not be constructed from the given settings
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
