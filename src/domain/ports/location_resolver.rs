//! Location Resolver Port
//!
//! Defines the interface for turning an IP address into a human-readable
//! location description.

use crate::domain::entities::LocationResult;
use async_trait::async_trait;
use std::net::IpAddr;

/// Resolver for IP address to location text.
///
/// This is an outbound port. Implementations may read a local database
/// (GeoLite2, ip2region) or call a remote HTTP API. A resolver never
/// fails: every problem is folded into the returned `LocationResult`.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &str;

    /// Resolve an address to a location description.
    async fn resolve(&self, ip: IpAddr) -> LocationResult;

    /// Build date of the backing database, for backends that have one.
    fn database_date(&self) -> Option<String> {
        None
    }

    /// Resolve an address given as text.
    ///
    /// Unparsable input yields `LocationResult::Unknown`.
    async fn resolve_str(&self, ip: &str) -> LocationResult {
        match ip.parse::<IpAddr>() {
            Ok(ip) => self.resolve(ip).await,
            Err(_) => {
                tracing::debug!("{}: not an IP address: {:?}", self.name(), ip);
                LocationResult::Unknown
            }
        }
    }
}
