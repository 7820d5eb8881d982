//! vore API Resolver
//!
//! Online lookup against `api.vore.top`.

use crate::adapters::outbound::api_client::{self, or_missing, ApiEnvelope};
use crate::adapters::outbound::error::ResolverError;
use crate::domain::entities::LocationResult;
use crate::domain::ports::LocationResolver;
use async_trait::async_trait;
use serde::Deserialize;
use std::net::IpAddr;

pub const DEFAULT_VORE_API_URL: &str = "https://api.vore.top/api/IPdata";

const CHINA: &str = "中国";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VoreResponse {
    code: i64,
    msg: String,
    ipinfo: VoreIpInfo,
    ipdata: VoreIpData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VoreIpInfo {
    cnip: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VoreIpData {
    info1: Option<String>,
    info2: Option<String>,
    info3: Option<String>,
    isp: Option<String>,
}

impl ApiEnvelope for VoreResponse {
    fn code(&self) -> i64 {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl VoreResponse {
    /// `country|subdivision|city|isp|vore-api|online`.
    ///
    /// For Chinese addresses vore drops the country, so `info1` is the
    /// province and `info2` the city.
    fn describe(&self) -> String {
        let data = &self.ipdata;
        let field = |f: &Option<String>| f.clone().unwrap_or_default();
        let (country, subdivision, city) = if self.ipinfo.cnip {
            (CHINA.to_string(), field(&data.info1), field(&data.info2))
        } else {
            (field(&data.info1), field(&data.info2), field(&data.info3))
        };
        let isp = field(&data.isp);
        format!(
            "{}|{}|{}|{}|vore-api|online",
            or_missing(&country),
            or_missing(&subdivision),
            or_missing(&city),
            or_missing(&isp)
        )
    }
}

pub struct VoreApiResolver {
    client: reqwest::Client,
    url: String,
}

impl VoreApiResolver {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn lookup(&self, ip: IpAddr) -> Result<String, ResolverError> {
        let ip = ip.to_string();
        let resp: VoreResponse =
            api_client::fetch(&self.client, &self.url, &[("ip", ip.as_str())]).await?;
        Ok(resp.describe())
    }
}

#[async_trait]
impl LocationResolver for VoreApiResolver {
    fn name(&self) -> &str {
        "vore"
    }

    async fn resolve(&self, ip: IpAddr) -> LocationResult {
        match self.lookup(ip).await {
            Ok(text) => LocationResult::Located(text),
            Err(e) => {
                tracing::debug!("vore lookup for {} failed: {}", ip, e);
                LocationResult::Unknown
            }
        }
    }
}
