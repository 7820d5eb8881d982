//! Shared plumbing for the online lookup APIs.
//!
//! Both providers answer a plain GET with a JSON envelope carrying a
//! numeric `code`; 200 means success regardless of the HTTP status line.

use crate::adapters::outbound::error::ResolverError;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Placeholder for fields a provider left empty.
pub const MISSING_FIELD: &str = "0";

/// Build the HTTP client used by the online resolvers.
///
/// Without a timeout the client waits as long as the server does.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!("failed to build http client ({}), using defaults", e);
        reqwest::Client::new()
    })
}

/// Envelope fields common to every provider.
pub trait ApiEnvelope {
    fn code(&self) -> i64;
    fn msg(&self) -> &str;
}

/// GET `url` with `query` and decode the JSON envelope.
///
/// Fails on transport errors, undecodable bodies and envelope codes
/// other than 200.
pub async fn fetch<T>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, ResolverError>
where
    T: DeserializeOwned + ApiEnvelope,
{
    let body = client.get(url).query(query).send().await?.text().await?;
    let envelope: T = serde_json::from_str(&body)?;
    if envelope.code() != 200 {
        return Err(ResolverError::Status {
            code: envelope.code(),
            msg: envelope.msg().to_string(),
        });
    }
    Ok(envelope)
}

/// The field itself, or the placeholder when it is empty.
pub fn or_missing(field: &str) -> &str {
    if field.is_empty() {
        MISSING_FIELD
    } else {
        field
    }
}
