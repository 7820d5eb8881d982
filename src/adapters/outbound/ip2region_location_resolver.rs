//! ip2region Resolver
//!
//! Implements LocationResolver on top of the ip2region xdb databases.
//! IPv4 and IPv6 live in separate files; the address family picks the
//! searcher.

use crate::adapters::outbound::error::ResolverError;
use crate::adapters::outbound::xdb::{IpVersion, XdbSearcher};
use crate::domain::entities::LocationResult;
use crate::domain::ports::LocationResolver;
use async_trait::async_trait;
use std::net::IpAddr;
use std::path::Path;

pub struct Ip2RegionLocationResolver {
    v4: XdbSearcher,
    v6: XdbSearcher,
}

impl Ip2RegionLocationResolver {
    /// Load both databases fully into memory.
    pub fn from_files(
        v4_path: impl AsRef<Path>,
        v6_path: impl AsRef<Path>,
    ) -> Result<Self, ResolverError> {
        let v4 = Self::read(v4_path.as_ref())?;
        let v6 = Self::read(v6_path.as_ref())?;
        Self::from_bytes(v4, v6)
    }

    pub fn from_bytes(v4: Vec<u8>, v6: Vec<u8>) -> Result<Self, ResolverError> {
        let v4 = Self::searcher(v4, IpVersion::V4)?;
        let v6 = Self::searcher(v6, IpVersion::V6)?;
        Ok(Self { v4, v6 })
    }

    fn read(path: &Path) -> Result<Vec<u8>, ResolverError> {
        std::fs::read(path).map_err(|e| ResolverError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn searcher(buf: Vec<u8>, expected: IpVersion) -> Result<XdbSearcher, ResolverError> {
        let searcher = XdbSearcher::from_bytes(buf)?;
        if searcher.ip_version() != expected {
            return Err(ResolverError::Open {
                path: format!("{expected} xdb"),
                reason: format!("database holds {} ranges", searcher.ip_version()),
            });
        }
        Ok(searcher)
    }

    fn search(&self, ip: IpAddr) -> Result<String, ResolverError> {
        let searcher = match ip {
            IpAddr::V4(_) => &self.v4,
            IpAddr::V6(_) => &self.v6,
        };
        Ok(searcher.search(ip)?)
    }
}

#[async_trait]
impl LocationResolver for Ip2RegionLocationResolver {
    fn name(&self) -> &str {
        "ip2region"
    }

    async fn resolve(&self, ip: IpAddr) -> LocationResult {
        match self.search(ip) {
            Ok(region) => LocationResult::Located(format!("{region}|ip2region|local")),
            Err(e) => {
                tracing::warn!("ip2region search for {} failed: {}", ip, e);
                LocationResult::Failed(format!("failed to search: {e}"))
            }
        }
    }

    fn database_date(&self) -> Option<String> {
        let created = i64::from(self.v4.header().created_at);
        chrono::DateTime::from_timestamp(created, 0).map(|t| t.format("%Y-%m-%d").to_string())
    }
}
