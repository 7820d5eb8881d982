//! Range List Loader
//!
//! Parses the node range resource: a `YYYY-MM-DD` date line followed by
//! one CIDR per line. Blank lines are skipped, anything else that fails to
//! parse rejects the whole list.

use crate::domain::entities::{NetworkRange, RangeCatalog};
use crate::domain::errors::CatalogError;
use crate::domain::value_objects::CatalogDate;
use ipnet::IpNet;
use std::path::Path;

/// Stateless loader for range lists.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse a range list from text.
    ///
    /// Carriage returns are dropped, so `\r\n` files load. Lines are
    /// otherwise taken as is: only truly empty lines are skipped and a
    /// padded entry is rejected.
    pub fn parse(text: &str) -> Result<RangeCatalog, CatalogError> {
        let text = text.replace('\r', "");
        let mut lines = text.split('\n');

        let first = lines.next().unwrap_or_default();
        let date = CatalogDate::parse(first)
            .ok_or_else(|| CatalogError::InvalidDate(first.to_string()))?;

        let mut ranges = Vec::new();
        for (idx, entry) in lines.enumerate() {
            if entry.is_empty() {
                continue;
            }
            let net = entry
                .parse::<IpNet>()
                .map_err(|_| CatalogError::InvalidCidr {
                    // +2: one for the date line, one for 1-based numbering
                    line: idx + 2,
                    entry: entry.to_string(),
                })?;
            ranges.push(NetworkRange::new(net));
        }

        tracing::debug!("loaded {} node ranges dated {}", ranges.len(), date);
        Ok(RangeCatalog::new(date, ranges))
    }

    /// Read and parse a range list from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<RangeCatalog, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }
}
