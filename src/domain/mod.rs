//! Domain layer: node ranges, location results and the resolver port.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{LocationResult, NetworkRange, NodeReport, QueryRequest, RangeCatalog};
pub use errors::{CatalogError, CheckError};
pub use value_objects::{CatalogDate, ResolverKind};
