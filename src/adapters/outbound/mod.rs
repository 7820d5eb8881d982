mod api_client;
mod error;
mod ip2region_location_resolver;
mod maxmind_location_resolver;
mod mir6_api_resolver;
mod resolver_factory;
mod unavailable_resolver;
mod vore_api_resolver;
pub mod xdb;

pub use error::ResolverError;
pub use ip2region_location_resolver::Ip2RegionLocationResolver;
pub use maxmind_location_resolver::MaxMindLocationResolver;
pub use mir6_api_resolver::{Mir6ApiResolver, DEFAULT_MIR6_API_URL};
pub use resolver_factory::build_resolvers;
pub use unavailable_resolver::UnavailableResolver;
pub use vore_api_resolver::{VoreApiResolver, DEFAULT_VORE_API_URL};
