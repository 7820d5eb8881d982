//! MaxMind GeoIP Resolver
//!
//! Implements LocationResolver using a MaxMind GeoLite2-City database.

use crate::adapters::outbound::error::ResolverError;
use crate::domain::entities::LocationResult;
use crate::domain::ports::LocationResolver;
use async_trait::async_trait;
use maxminddb::Reader;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

const LANG: &str = "en";

#[derive(Debug, Default, Deserialize)]
struct Named {
    names: Option<BTreeMap<String, String>>,
}

impl Named {
    fn name(&self) -> Option<&str> {
        self.names.as_ref()?.get(LANG).map(String::as_str)
    }
}

/// The parts of a GeoLite2-City record we print.
#[derive(Debug, Default, Deserialize)]
struct CityRecord {
    country: Option<Named>,
    subdivisions: Option<Vec<Named>>,
    city: Option<Named>,
}

impl CityRecord {
    /// `[country][subdivision][city]`, dropping trailing parts that are
    /// missing. No country means nothing worth printing.
    fn describe(&self) -> Option<String> {
        let country = self.country.as_ref()?.name()?;

        let subdivision = self
            .subdivisions
            .as_ref()
            .and_then(|subs| subs.first())
            .and_then(Named::name);
        let Some(subdivision) = subdivision else {
            return Some(format!("[{country}]"));
        };

        match self.city.as_ref().and_then(Named::name) {
            Some(city) => Some(format!("[{country}][{subdivision}][{city}]")),
            None => Some(format!("[{country}][{subdivision}]")),
        }
    }
}

/// MaxMind GeoIP resolver.
///
/// Looks addresses up in a GeoLite2-City database and prints English
/// country, first subdivision and city names.
pub struct MaxMindLocationResolver {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindLocationResolver {
    /// Load a GeoIP database from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ResolverError> {
        let path = path.as_ref();
        let reader = Reader::open_readfile(path).map_err(|e| ResolverError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }

    /// Load a GeoIP database from memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ResolverError> {
        let reader = Reader::from_source(bytes)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }

    fn lookup(&self, ip: IpAddr) -> Result<CityRecord, ResolverError> {
        Ok(self.reader.lookup::<CityRecord>(ip)?)
    }
}

#[async_trait]
impl LocationResolver for MaxMindLocationResolver {
    fn name(&self) -> &str {
        "geolite2"
    }

    async fn resolve(&self, ip: IpAddr) -> LocationResult {
        match self.lookup(ip) {
            Ok(record) => record
                .describe()
                .map(LocationResult::Located)
                .unwrap_or(LocationResult::Unknown),
            Err(e) => {
                tracing::debug!("geolite2 lookup for {} failed: {}", ip, e);
                LocationResult::Unknown
            }
        }
    }

    fn database_date(&self) -> Option<String> {
        let epoch = i64::try_from(self.reader.metadata.build_epoch).ok()?;
        chrono::DateTime::from_timestamp(epoch, 0).map(|t| t.format("%Y-%m-%d").to_string())
    }
}
