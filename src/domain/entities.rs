//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of node IP checking.
//! They have no I/O and contain only business logic.

use crate::domain::errors::CheckError;
use crate::domain::value_objects::CatalogDate;
use ipnet::IpNet;
use std::fmt;
use std::net::IpAddr;

/// One published node range, e.g. `10.0.0.0/24`.
///
/// Host bits are cleared on construction so `10.0.0.5/24` and
/// `10.0.0.0/24` describe (and print as) the same range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkRange(IpNet);

impl NetworkRange {
    pub fn new(net: IpNet) -> Self {
        Self(net.trunc())
    }

    pub fn net(&self) -> IpNet {
        self.0
    }

    /// Whether `ip` lies inside this range.
    ///
    /// An address of the other family is never contained.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.0.contains(ip)
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The node range list active for one invocation.
///
/// Ranges keep the order they had in the source text; nothing is
/// sorted or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCatalog {
    date: CatalogDate,
    ranges: Vec<NetworkRange>,
}

impl RangeCatalog {
    pub fn new(date: CatalogDate, ranges: Vec<NetworkRange>) -> Self {
        Self { date, ranges }
    }

    pub fn date(&self) -> CatalogDate {
        self.date
    }

    pub fn ranges(&self) -> &[NetworkRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Containment check: true if any range holds `ip`.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.ranges.iter().any(|range| range.contains(ip))
    }

    /// First range holding `ip`, in catalog order.
    pub fn find(&self, ip: &IpAddr) -> Option<&NetworkRange> {
        self.ranges.iter().find(|range| range.contains(ip))
    }
}

/// The single address checked by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Address as the user typed it
    pub raw: String,
    /// Parsed address
    pub ip: IpAddr,
}

impl QueryRequest {
    pub fn parse(raw: &str) -> Result<Self, CheckError> {
        let ip = raw
            .parse::<IpAddr>()
            .map_err(|_| CheckError::InvalidAddress(raw.to_string()))?;
        Ok(Self {
            raw: raw.to_string(),
            // ::ffff:a.b.c.d is checked as a.b.c.d
            ip: ip.to_canonical(),
        })
    }
}

/// What a location resolver produced for an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationResult {
    /// Formatted location summary
    Located(String),
    /// The backend had nothing to say (or failed quietly)
    Unknown,
    /// The backend failed and wants the reason shown
    Failed(String),
}

impl LocationResult {
    pub const UNKNOWN: &'static str = "unknown";
}

impl fmt::Display for LocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Located(text) | Self::Failed(text) => f.write_str(text),
            Self::Unknown => f.write_str(Self::UNKNOWN),
        }
    }
}

/// Full answer for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReport {
    pub request: QueryRequest,
    /// One result per configured resolver, in configured order
    pub locations: Vec<LocationResult>,
    /// First catalog range holding the address, if any
    pub matched: Option<NetworkRange>,
}

impl NodeReport {
    pub fn is_node(&self) -> bool {
        self.matched.is_some()
    }
}
