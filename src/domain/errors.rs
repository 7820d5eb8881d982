//! Domain errors.
//!
//! Only range list and input problems are errors at this level. Resolver
//! failures never leave their adapter; they become a `LocationResult`.

use std::path::PathBuf;
use std::process::ExitCode;

/// Problems loading a range list.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid date line {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid CIDR {entry:?} on line {line}")]
    InvalidCidr { line: usize, entry: String },

    #[error("failed to read range file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Self::Read { .. })
    }
}

/// Everything that ends a run early.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("no IP address given")]
    MissingAddress,

    #[error("IP address format error: {0:?}")]
    InvalidAddress(String),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CheckError {
    /// Process exit status for this failure (sysexits.h values).
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }

    pub fn status(&self) -> u8 {
        match self {
            Self::MissingAddress | Self::InvalidAddress(_) => 64,
            Self::Catalog(e) if e.is_format_error() => 65,
            Self::Catalog(_) => 66,
            Self::Output(_) => 74,
        }
    }
}
