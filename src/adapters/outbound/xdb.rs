//! ip2region xdb searcher
//!
//! In-memory reader for ip2region `.xdb` files. Both the legacy v2 layout
//! (IPv4 only) and the v3 layout (IPv4 or IPv6 per file) are supported.
//!
//! Layout:
//! - 256 byte header (little-endian): version u16, index policy u16,
//!   created_at u32, start index ptr u32, end index ptr u32, and for v3
//!   ip version u16 and runtime pointer bytes u16.
//! - Vector index right after the header: 256 x 256 slots of
//!   (segment start ptr u32, segment end ptr u32), keyed by the first two
//!   address bytes.
//! - Segment index: sorted fixed-size records of
//!   (start ip, end ip, data len u16, data ptr u32). IPv4 addresses are
//!   stored little-endian, IPv6 addresses big-endian.
//! - Region strings, UTF-8, referenced by the segment records.

use std::cmp::Ordering;
use std::net::IpAddr;

const HEADER_LEN: usize = 256;
const VECTOR_INDEX_COLS: usize = 256;
const VECTOR_INDEX_SIZE: usize = 8;
const VECTOR_INDEX_LEN: usize = 256 * VECTOR_INDEX_COLS * VECTOR_INDEX_SIZE;

const VERSION_LEGACY: u16 = 2;
const VERSION_V3: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XdbError {
    #[error("xdb buffer too short: {0} bytes")]
    Truncated(usize),

    #[error("unsupported xdb version {0}")]
    UnsupportedVersion(u16),

    #[error("unsupported xdb ip version {0}")]
    UnsupportedIpVersion(u16),

    #[error("{ip} is not an {expected} address")]
    FamilyMismatch { ip: IpAddr, expected: IpVersion },

    #[error("segment pointer {0} out of bounds")]
    OutOfBounds(usize),

    #[error("region data is not valid utf-8")]
    InvalidRegion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Address length in bytes.
    fn bytes(&self) -> usize {
        match self {
            Self::V4 => 4,
            Self::V6 => 16,
        }
    }

    /// Size of one segment index record.
    fn segment_index_size(&self) -> usize {
        self.bytes() * 2 + 2 + 4
    }

    fn compare(&self, ip: &[u8], stored: &[u8]) -> Ordering {
        match self {
            // stored little-endian, `ip` is network order
            Self::V4 => ip.iter().cmp(stored.iter().rev()),
            Self::V6 => ip.cmp(stored),
        }
    }
}

impl std::fmt::Display for IpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V4 => f.write_str("IPv4"),
            Self::V6 => f.write_str("IPv6"),
        }
    }
}

/// The xdb header fields searching and reporting need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: u16,
    pub created_at: u32,
    pub ip_version: IpVersion,
}

impl Header {
    pub fn parse(buf: &[u8]) -> Result<Self, XdbError> {
        if buf.len() < HEADER_LEN {
            return Err(XdbError::Truncated(buf.len()));
        }
        let version = read_u16(buf, 0);
        let ip_version = match version {
            VERSION_LEGACY => IpVersion::V4,
            VERSION_V3 => match read_u16(buf, 16) {
                4 => IpVersion::V4,
                6 => IpVersion::V6,
                other => return Err(XdbError::UnsupportedIpVersion(other)),
            },
            other => return Err(XdbError::UnsupportedVersion(other)),
        };
        Ok(Self {
            version,
            created_at: read_u32(buf, 4),
            ip_version,
        })
    }
}

/// Searcher over a fully loaded xdb buffer.
#[derive(Debug, Clone)]
pub struct XdbSearcher {
    header: Header,
    buf: Vec<u8>,
}

impl XdbSearcher {
    pub fn from_bytes(buf: Vec<u8>) -> Result<Self, XdbError> {
        let header = Header::parse(&buf)?;
        if buf.len() < HEADER_LEN + VECTOR_INDEX_LEN {
            return Err(XdbError::Truncated(buf.len()));
        }
        Ok(Self { header, buf })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn ip_version(&self) -> IpVersion {
        self.header.ip_version
    }

    /// Region string for `ip`, or an empty string when no segment covers it.
    pub fn search(&self, ip: IpAddr) -> Result<String, XdbError> {
        let octets: Vec<u8> = match (ip, self.header.ip_version) {
            (IpAddr::V4(v4), IpVersion::V4) => v4.octets().to_vec(),
            (IpAddr::V6(v6), IpVersion::V6) => v6.octets().to_vec(),
            (ip, expected) => return Err(XdbError::FamilyMismatch { ip, expected }),
        };

        let slot = HEADER_LEN
            + usize::from(octets[0]) * VECTOR_INDEX_COLS * VECTOR_INDEX_SIZE
            + usize::from(octets[1]) * VECTOR_INDEX_SIZE;
        let start = read_u32(&self.buf, slot) as usize;
        let end = read_u32(&self.buf, slot + 4) as usize;
        if start == 0 && end == 0 {
            return Ok(String::new());
        }
        if end < start {
            return Err(XdbError::OutOfBounds(end));
        }

        let version = self.header.ip_version;
        let width = version.bytes();
        let record_size = version.segment_index_size();

        let mut lo: isize = 0;
        let mut hi: isize = ((end - start) / record_size) as isize;
        while lo <= hi {
            let mid = (lo + hi) / 2;
            let p = start + mid as usize * record_size;
            let Some(record) = self.buf.get(p..p + record_size) else {
                // end pointer may be exclusive; nothing lives past the buffer
                hi = mid - 1;
                continue;
            };

            if version.compare(&octets, &record[..width]) == Ordering::Less {
                hi = mid - 1;
            } else if version.compare(&octets, &record[width..width * 2]) == Ordering::Greater {
                lo = mid + 1;
            } else {
                let len = usize::from(read_u16(record, width * 2));
                let ptr = read_u32(record, width * 2 + 2) as usize;
                let data = self
                    .buf
                    .get(ptr..ptr + len)
                    .ok_or(XdbError::OutOfBounds(ptr))?;
                return String::from_utf8(data.to_vec()).map_err(|_| XdbError::InvalidRegion);
            }
        }

        Ok(String::new())
    }
}

fn read_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}
