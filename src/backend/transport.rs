use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Method;
use reqwest::Url;
use tracing::debug;
use tracing::warn;

use crate::ConnectionConfig;
use crate::TransportError;

/// A single REST call, addressed by path segments relative to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub segments: Vec<String>,
    pub body: Option<String>,
}

impl Request {
    pub fn new(
        method: Method,
        segments: &[&str],
    ) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            body: None,
        }
    }

    pub fn with_body(
        mut self,
        body: impl Into<String>,
    ) -> Self {
        self.body = Some(body.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Ordered endpoint list the transport sends to.
    fn urls(&self) -> Vec<String>;

    async fn perform(
        &self,
        request: Request,
    ) -> Result<Response, TransportError>;
}

/// `reqwest` transport over a static endpoint list.
///
/// Endpoints are tried in order; the next one is only used when no connection to
/// the previous one could be established. Once a request has been sent it is never
/// resent elsewhere, not even after a timeout: the first node may have applied it.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    urls: Vec<String>,
    credentials: Option<(String, Option<String>)>,
}

impl HttpTransport {
    pub fn new(config: &ConnectionConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_in_ms))
            .timeout(Duration::from_millis(config.request_timeout_in_ms))
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(TransportError::ClientBuild)?;

        Ok(Self {
            client,
            urls: config.urls.clone(),
            credentials: config
                .username
                .clone()
                .map(|username| (username, config.password.clone())),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn urls(&self) -> Vec<String> {
        self.urls.clone()
    }

    async fn perform(
        &self,
        request: Request,
    ) -> Result<Response, TransportError> {
        if self.urls.is_empty() {
            return Err(TransportError::NoEndpoints);
        }

        let mut unreachable = Vec::new();
        for base in &self.urls {
            let url = endpoint_url(base, &request.segments)?;
            let mut builder = self.client.request(request.method.clone(), url.clone());
            if let Some((username, password)) = &self.credentials {
                builder = builder.basic_auth(username, password.as_ref());
            }
            if let Some(body) = &request.body {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(body.clone());
            }

            match builder.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response.text().await.map_err(|source| TransportError::Request {
                        url: url.to_string(),
                        source,
                    })?;
                    debug!("{} {} -> {}", request.method, url, status);
                    return Ok(Response { status, body });
                }
                Err(e) if e.is_connect() => {
                    warn!("endpoint {} unreachable: {}", base, e);
                    unreachable.push(format!("{}: {}", base, e));
                }
                Err(source) => {
                    return Err(TransportError::Request {
                        url: url.to_string(),
                        source,
                    })
                }
            }
        }

        Err(TransportError::Unreachable(unreachable.join("; ")))
    }
}

/// Joins `segments` onto `base`, percent-encoding each segment.
pub(crate) fn endpoint_url(
    base: &str,
    segments: &[String],
) -> Result<Url, TransportError> {
    let mut url = Url::parse(base).map_err(|_| TransportError::InvalidUrl(base.to_string()))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(base.to_string()))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}
