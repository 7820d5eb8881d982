//! Stand-in for a resolver whose backing database failed to open.
//!
//! Keeps the report layout stable: the slot still prints a line, just
//! always the same sentinel.

use crate::domain::entities::LocationResult;
use crate::domain::ports::LocationResolver;
use async_trait::async_trait;
use std::net::IpAddr;

pub struct UnavailableResolver {
    name: String,
    result: LocationResult,
}

impl UnavailableResolver {
    pub fn new(name: impl Into<String>, result: LocationResult) -> Self {
        Self {
            name: name.into(),
            result,
        }
    }
}

#[async_trait]
impl LocationResolver for UnavailableResolver {
    fn name(&self) -> &str {
        &self.name
    }

    async fn resolve(&self, _ip: IpAddr) -> LocationResult {
        self.result.clone()
    }
}
