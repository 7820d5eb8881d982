//! Wires the configured location backends into resolver instances.

use crate::adapters::outbound::api_client;
use crate::adapters::outbound::{
    Ip2RegionLocationResolver, MaxMindLocationResolver, Mir6ApiResolver, UnavailableResolver,
    VoreApiResolver,
};
use crate::config::Config;
use crate::domain::entities::LocationResult;
use crate::domain::ports::LocationResolver;
use crate::domain::value_objects::ResolverKind;
use std::sync::Arc;

/// Build one resolver per configured kind, in configured order.
///
/// A local database that fails to open does not abort the run; its slot
/// gets an `UnavailableResolver` reporting that backend's sentinel.
pub fn build_resolvers(cfg: &Config) -> Vec<Arc<dyn LocationResolver>> {
    let client = api_client::build_client(cfg.http_timeout);

    cfg.resolvers
        .iter()
        .map(|kind| -> Arc<dyn LocationResolver> {
            match kind {
                ResolverKind::GeoLite2 => match MaxMindLocationResolver::from_file(&cfg.geoip_path)
                {
                    Ok(r) => {
                        tracing::debug!("GeoIP DB loaded from {}", cfg.geoip_path);
                        Arc::new(r)
                    }
                    Err(e) => {
                        tracing::warn!("GeoLite2 city database error: {}", e);
                        Arc::new(UnavailableResolver::new(
                            kind.as_str(),
                            LocationResult::Unknown,
                        ))
                    }
                },
                ResolverKind::Ip2Region => match Ip2RegionLocationResolver::from_files(
                    &cfg.ip2region_v4_path,
                    &cfg.ip2region_v6_path,
                ) {
                    Ok(r) => {
                        tracing::debug!(
                            "ip2region DBs loaded from {} and {}",
                            cfg.ip2region_v4_path,
                            cfg.ip2region_v6_path
                        );
                        Arc::new(r)
                    }
                    Err(e) => {
                        tracing::warn!("ip2region database error: {}", e);
                        Arc::new(UnavailableResolver::new(
                            kind.as_str(),
                            LocationResult::Failed(format!(
                                "failed to create ip2region service: {e}"
                            )),
                        ))
                    }
                },
                ResolverKind::Vore => {
                    Arc::new(VoreApiResolver::new(client.clone(), cfg.vore_api_url.clone()))
                }
                ResolverKind::Mir6 => {
                    Arc::new(Mir6ApiResolver::new(client.clone(), cfg.mir6_api_url.clone()))
                }
            }
        })
        .collect()
}
