//! nodeip-check Library
//!
//! Checks whether an IP address belongs to a published set of node
//! ranges and reports where the address appears to be located. Exposed
//! as a library for the integration tests and the `checknodeip` binary.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::inbound::{Args, CliDriver};
pub use adapters::outbound::build_resolvers;
pub use application::NodeCheckService;
pub use config::{load_config, Config};
pub use domain::entities::{LocationResult, NetworkRange, NodeReport, QueryRequest, RangeCatalog};
pub use domain::errors::{CatalogError, CheckError};
pub use domain::ports::LocationResolver;
pub use domain::services::CatalogLoader;
