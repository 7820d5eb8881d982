//! Errors raised inside resolver adapters.
//!
//! These never cross the `LocationResolver` port; adapters log them and
//! fold them into a `LocationResult`.

use crate::adapters::outbound::xdb::XdbError;

#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("failed to open {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("geoip lookup failed: {0}")]
    MaxMind(#[from] maxminddb::MaxMindDBError),

    #[error(transparent)]
    Xdb(#[from] XdbError),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("api returned code {code}: {msg}")]
    Status { code: i64, msg: String },
}
