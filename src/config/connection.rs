use reqwest::Url;
use serde::Deserialize;
use serde::Serialize;

use crate::BackendVersion;
use crate::Error;
use crate::Result;

/// How to reach the cluster whose watches are reconciled.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConnectionConfig {
    /// Ordered endpoint list; the first reachable one serves requests
    /// Default: ["http://127.0.0.1:9200"]
    #[serde(default = "default_urls")]
    pub urls: Vec<String>,

    /// Basic-auth user name
    #[serde(default)]
    pub username: Option<String>,

    /// Basic-auth password
    #[serde(default)]
    pub password: Option<String>,

    /// Client generation (5, 6 or 7); probed from the cluster root when unset
    #[serde(default)]
    pub version: Option<u8>,

    /// Ping the cluster once the handle is built
    /// Default: true
    #[serde(default = "default_healthcheck")]
    pub healthcheck: bool,

    /// Maximum time to establish a TCP connection
    /// Default: 1000ms
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_in_ms: u64,

    /// Maximum time for a complete request/response
    /// Default: 30000ms
    #[serde(default = "default_request_timeout")]
    pub request_timeout_in_ms: u64,

    /// Skip TLS certificate verification
    /// Default: false
    #[serde(default)]
    pub insecure: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            urls: default_urls(),
            username: None,
            password: None,
            version: None,
            healthcheck: default_healthcheck(),
            connect_timeout_in_ms: default_connect_timeout(),
            request_timeout_in_ms: default_request_timeout(),
            insecure: false,
        }
    }
}

impl ConnectionConfig {
    pub fn validate(&self) -> Result<()> {
        for url in &self.urls {
            let parsed =
                Url::parse(url).map_err(|e| Error::InvalidConfig(format!("invalid url {:?}: {}", url, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::InvalidConfig(format!(
                    "url {:?} must use http or https",
                    url
                )));
            }
        }

        if let Some(major) = self.version {
            BackendVersion::from_major(major)
                .map_err(|_| Error::InvalidConfig(format!("version must be 5, 6 or 7, got {}", major)))?;
        }

        if self.password.is_some() && self.username.is_none() {
            return Err(Error::InvalidConfig("password is set but username is missing".into()));
        }

        if self.connect_timeout_in_ms == 0 || self.request_timeout_in_ms == 0 {
            return Err(Error::InvalidConfig("timeouts must be greater than 0".into()));
        }

        Ok(())
    }
}

fn default_urls() -> Vec<String> {
    vec!["http://127.0.0.1:9200".to_string()]
}
fn default_healthcheck() -> bool {
    true
}
fn default_connect_timeout() -> u64 {
    1000
}
fn default_request_timeout() -> u64 {
    30000
}
