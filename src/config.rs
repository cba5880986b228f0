use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_LISTEN: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 5000));
pub const DEFAULT_BASE_URL: &str = "https://www.nintendo.com/json/content/get/filter/game";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub listen: SocketAddr,
    pub upstream: UpstreamConfig,
    /// Upper bound on the number of pages fetched for a single request.
    /// Without it a feed whose total never settles keeps the request running.
    pub max_pages: Option<NonZeroUsize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub system: String,
    pub sort: String,
    pub direction: String,
    pub shop: String,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN,
            upstream: UpstreamConfig::default(),
            max_pages: None,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            system: "switch".to_string(),
            sort: "title".to_string(),
            direction: "asc".to_string(),
            shop: "ncom".to_string(),
            timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// The query parameters sent with every page request, minus the offset.
    pub fn query(&self) -> [(&'static str, &str); 4] {
        [
            ("system", self.system.as_str()),
            ("sort", self.sort.as_str()),
            ("direction", self.direction.as_str()),
            ("shop", self.shop.as_str()),
        ]
    }
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content)
    }
}
