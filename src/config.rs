use crate::adapters::outbound::{DEFAULT_MIR6_API_URL, DEFAULT_VORE_API_URL};
use crate::domain::value_objects::ResolverKind;
use anyhow::Context;
use std::time::Duration;

/// Range list compiled into the binary.
pub const EMBEDDED_NODES: &str = include_str!("../data/nodes.txt");

/// Version string stamped at build time.
pub const VERSION: &str = match option_env!("NODECHECK_BUILD_VERSION") {
    Some(v) => v,
    None => "local-build",
};

/// Run configuration, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub version: String,
    pub embedded_nodes: &'static str,

    // Location backends, in report order
    pub resolvers: Vec<ResolverKind>,
    pub geoip_path: String,
    pub ip2region_v4_path: String,
    pub ip2region_v6_path: String,
    pub vore_api_url: String,
    pub mir6_api_url: String,
    pub http_timeout: Option<Duration>,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: VERSION.to_string(),
            embedded_nodes: EMBEDDED_NODES,
            resolvers: vec![ResolverKind::GeoLite2, ResolverKind::Vore],
            geoip_path: "GeoLite2-City.mmdb".to_string(),
            ip2region_v4_path: "ip2region_v4.xdb".to_string(),
            ip2region_v6_path: "ip2region_v6.xdb".to_string(),
            vore_api_url: DEFAULT_VORE_API_URL.to_string(),
            mir6_api_url: DEFAULT_MIR6_API_URL.to_string(),
            http_timeout: None,
            debug: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Build a config from any variable source (the process environment in
/// production, a map in tests).
pub fn load_config_from<F>(var: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let resolvers = match var("NODECHECK_RESOLVERS") {
        Some(list) => ResolverKind::parse_list(&list).context("invalid NODECHECK_RESOLVERS")?,
        None => defaults.resolvers,
    };

    let geoip_path = var("NODECHECK_GEOIP_PATH").unwrap_or(defaults.geoip_path);

    let ip2region_v4_path =
        var("NODECHECK_IP2REGION_V4_PATH").unwrap_or(defaults.ip2region_v4_path);

    let ip2region_v6_path =
        var("NODECHECK_IP2REGION_V6_PATH").unwrap_or(defaults.ip2region_v6_path);

    let vore_api_url = var("NODECHECK_VORE_API_URL").unwrap_or(defaults.vore_api_url);

    let mir6_api_url = var("NODECHECK_MIR6_API_URL").unwrap_or(defaults.mir6_api_url);

    let http_timeout = var("NODECHECK_HTTP_TIMEOUT_SECS")
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    let debug = var("DEBUG").is_some();

    Ok(Config {
        version: defaults.version,
        embedded_nodes: defaults.embedded_nodes,
        resolvers,
        geoip_path,
        ip2region_v4_path,
        ip2region_v6_path,
        vore_api_url,
        mir6_api_url,
        http_timeout,
        debug,
    })
}
