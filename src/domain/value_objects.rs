//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Freshness stamp found on the first line of a range list.
///
/// Only used for display, but it must be a real calendar date written
/// exactly as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CatalogDate(NaiveDate);

impl CatalogDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Parse a date line, rejecting anything that does not round-trip.
    ///
    /// # Examples
    /// ```
    /// use nodeip_check::domain::value_objects::CatalogDate;
    ///
    /// assert!(CatalogDate::parse("2024-01-01").is_some());
    /// assert!(CatalogDate::parse("2024-1-1").is_none());
    /// assert!(CatalogDate::parse("not-a-date").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(s, Self::FORMAT).ok()?;
        // chrono accepts unpadded fields, the range list format does not
        if date.format(Self::FORMAT).to_string() != s {
            return None;
        }
        Some(Self(date))
    }
}

impl fmt::Display for CatalogDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// Location backends that can be wired into a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverKind {
    /// MaxMind GeoLite2-City database on disk
    GeoLite2,
    /// ip2region xdb databases (IPv4 + IPv6)
    Ip2Region,
    /// api.vore.top online lookup
    Vore,
    /// api.mir6.com online lookup
    Mir6,
}

impl ResolverKind {
    pub const ALL: [ResolverKind; 4] = [Self::GeoLite2, Self::Ip2Region, Self::Vore, Self::Mir6];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeoLite2 => "geolite2",
            Self::Ip2Region => "ip2region",
            Self::Vore => "vore",
            Self::Mir6 => "mir6",
        }
    }

    /// Parse a comma separated resolver list, keeping the given order.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, UnknownResolver> {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for ResolverKind {
    type Err = UnknownResolver;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "geolite2" | "maxmind" => Ok(Self::GeoLite2),
            "ip2region" => Ok(Self::Ip2Region),
            "vore" => Ok(Self::Vore),
            "mir6" => Ok(Self::Mir6),
            _ => Err(UnknownResolver(s.to_string())),
        }
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resolver {0:?} (expected one of geolite2, ip2region, vore, mir6)")]
pub struct UnknownResolver(pub String);
