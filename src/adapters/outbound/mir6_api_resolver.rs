//! mir6 API Resolver
//!
//! Online lookup against `api.mir6.com`.

use crate::adapters::outbound::api_client::{self, or_missing, ApiEnvelope};
use crate::adapters::outbound::error::ResolverError;
use crate::domain::entities::LocationResult;
use crate::domain::ports::LocationResolver;
use async_trait::async_trait;
use serde::Deserialize;
use std::net::IpAddr;

pub const DEFAULT_MIR6_API_URL: &str = "https://api.mir6.com/api/ip";

const CHINA: &str = "中国";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Mir6Response {
    code: i64,
    msg: String,
    data: Mir6Data,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Mir6Data {
    country: Option<String>,
    country_code: Option<String>,
    province: Option<String>,
    city: Option<String>,
    isp: Option<String>,
}

impl ApiEnvelope for Mir6Response {
    fn code(&self) -> i64 {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl Mir6Data {
    /// `country|province|city|isp|countryCode|mir6-api|online`.
    fn describe(&self) -> String {
        let country = self.country.as_deref().unwrap_or_default();
        let country_code = self.country_code.as_deref().unwrap_or_default();
        let country = if country == CHINA || country_code == "CN" {
            CHINA
        } else {
            country
        };
        format!(
            "{}|{}|{}|{}|{}|mir6-api|online",
            or_missing(country),
            or_missing(self.province.as_deref().unwrap_or_default()),
            or_missing(self.city.as_deref().unwrap_or_default()),
            or_missing(self.isp.as_deref().unwrap_or_default()),
            or_missing(country_code)
        )
    }
}

pub struct Mir6ApiResolver {
    client: reqwest::Client,
    url: String,
}

impl Mir6ApiResolver {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn lookup(&self, ip: IpAddr) -> Result<String, ResolverError> {
        let ip = ip.to_string();
        let resp: Mir6Response = api_client::fetch(
            &self.client,
            &self.url,
            &[("type", "json"), ("ip", ip.as_str())],
        )
        .await?;
        Ok(resp.data.describe())
    }
}

#[async_trait]
impl LocationResolver for Mir6ApiResolver {
    fn name(&self) -> &str {
        "mir6"
    }

    async fn resolve(&self, ip: IpAddr) -> LocationResult {
        match self.lookup(ip).await {
            Ok(text) => LocationResult::Located(text),
            Err(e) => {
                tracing::debug!("mir6 lookup for {} failed: {}", ip, e);
                LocationResult::Unknown
            }
        }
    }
}
