//! Tika server client implementation

use crate::config::{normalize_base_url, TikaConfig, DEFAULT_ENDPOINT, ENDPOINT_ENV_VAR};
use crate::error::{Result, TikaError};
use crate::metadata::parse_metadata;
use crate::models::Metadata;
use crate::text;
use reqwest::{header, Body, Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::form_urlencoded;

/// Client for a running Apache Tika server
#[derive(Clone)]
pub struct TikaClient {
    http: Client,
    base_url: String,
}

impl std::fmt::Debug for TikaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TikaClient")
            .field("base_url", &redact_password(&self.base_url))
            .finish()
    }
}

/// Builder for creating a TikaClient
#[derive(Default)]
pub struct TikaClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TikaClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server address
    pub fn endpoint(mut self, address: impl Into<String>) -> Self {
        self.endpoint = Some(address.into());
        self
    }

    /// Set the transport timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<TikaClient> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let base_url = normalize_base_url(&endpoint)?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("tika-sdk/{}", env!("CARGO_PKG_VERSION")));

        let mut http = Client::builder().user_agent(user_agent);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build().map_err(TikaError::Http)?;

        debug!(base_url = %redact_password(&base_url), "Created Tika client");
        Ok(TikaClient { http, base_url })
    }
}

impl TikaClient {
    /// Create a new client builder
    pub fn builder() -> TikaClientBuilder {
        TikaClientBuilder::new()
    }

    /// Create a client for the given address.
    ///
    /// The scheme is forced to `http` and any path is discarded, so
    /// `tcp://tika:9998/tika` becomes `http://tika:9998`.
    pub fn new(address: impl Into<String>) -> Result<Self> {
        Self::builder().endpoint(address).build()
    }

    /// Create a client from explicit configuration
    pub fn from_config(config: &TikaConfig) -> Result<Self> {
        let mut builder = Self::builder().endpoint(config.endpoint.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Create a client from the `TIKA_PORT` environment variable
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(ENDPOINT_ENV_VAR)
    }

    /// Create a client from the named environment variable
    pub fn from_env_var(name: &str) -> Result<Self> {
        let config = TikaConfig::from_env_var(name)?;
        Self::from_config(&config).map_err(|err| match err {
            TikaError::Url(parse_err) => TikaError::config(format!(
                "'{name}' does not hold a usable Tika endpoint: {parse_err}"
            )),
            other => other,
        })
    }

    /// Get the base URL, e.g. `http://localhost:9998`.
    ///
    /// Credentials given in the address are kept and sent as basic auth.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the request and hand back the response only for 200 OK.
    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(TikaError::Http)?;
        let status = response.status();

        if status == StatusCode::OK {
            return Ok(response);
        }

        // Drain the body so the connection goes back to the pool.
        let _ = response.bytes().await;
        warn!(status = status.as_u16(), "Tika server rejected request");

        Err(TikaError::Upstream {
            status: status.as_u16(),
            status_line: status.to_string(),
        })
    }

    async fn read_body(response: Response) -> Result<String> {
        let body = response.text().await.map_err(TikaError::Decode)?;
        debug!(bytes = body.len(), "Read response body");
        Ok(body)
    }

    // ===== Extraction API =====

    /// Extract the plain text of a document.
    ///
    /// Diacritics are removed and runs of blank lines are reduced to a
    /// single line break. The body is decoded with the charset the server
    /// declares (UTF-8 by default); invalid sequences become U+FFFD.
    #[instrument(skip(self, content))]
    pub async fn parse(
        &self,
        content: impl Into<Body>,
        content_type: Option<&str>,
    ) -> Result<String> {
        let mut req = self
            .http
            .put(self.url("/tika"))
            .header(header::ACCEPT, "text/plain")
            .body(content.into());

        if let Some(content_type) = content_type.filter(|ct| !ct.is_empty()) {
            req = req.header(header::CONTENT_TYPE, content_type);
        }

        let response = self.execute(req).await?;
        let raw = Self::read_body(response).await?;
        Ok(text::clean_plain_text(&raw))
    }

    /// Extract the text of a container document and everything embedded in it.
    ///
    /// Blank-line runs become a single empty line and the result is trimmed.
    /// The body is decoded with the charset the server declares (UTF-8 by
    /// default); invalid sequences become U+FFFD.
    #[instrument(skip(self, content))]
    pub async fn recursive_parse(
        &self,
        content: impl Into<Body>,
        content_type: Option<&str>,
    ) -> Result<String> {
        let mut req = self
            .http
            .put(self.url("/rmeta/text"))
            .body(content.into());

        if let Some(content_type) = content_type.filter(|ct| !ct.is_empty()) {
            req = req.header(header::CONTENT_TYPE, content_type);
        }

        let response = self.execute(req).await?;
        let raw = Self::read_body(response).await?;
        Ok(text::clean_recursive_text(&raw))
    }

    // ===== Metadata API =====

    /// Fetch document metadata as a key/value mapping
    #[instrument(skip(self, content))]
    pub async fn get_metadata(
        &self,
        content: impl Into<Body>,
        filename: &str,
    ) -> Result<Metadata> {
        let req = self
            .http
            .put(self.url("/meta"))
            .header(header::CONTENT_DISPOSITION, content_disposition(filename))
            .header(header::ACCEPT, "text/csv")
            .body(content.into());

        let response = self.execute(req).await?;
        let body = Self::read_body(response).await?;
        let metadata = parse_metadata(&body);
        debug!(entries = metadata.len(), "Parsed metadata");
        Ok(metadata)
    }

    /// Detect the MIME type of a document.
    ///
    /// The server's answer is returned as is, without trimming.
    #[instrument(skip(self, content))]
    pub async fn detect_type(&self, content: impl Into<Body>, filename: &str) -> Result<String> {
        let req = self
            .http
            .put(self.url("/detect/stream"))
            .header(header::CONTENT_DISPOSITION, content_disposition(filename))
            .body(content.into());

        let response = self.execute(req).await?;
        Self::read_body(response).await
    }

    // ===== Server API =====

    /// Get the server's version banner, e.g. `Apache Tika 2.9.1`
    #[instrument(skip(self))]
    pub async fn version(&self) -> Result<String> {
        let response = self.execute(self.http.get(self.url("/version"))).await?;
        let banner = Self::read_body(response).await?;
        Ok(banner.trim().to_string())
    }
}

fn redact_password(base_url: &str) -> String {
    match url::Url::parse(base_url) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("REDACTED"));
            url.as_str().trim_end_matches('/').to_string()
        }
        _ => base_url.to_string(),
    }
}

/// `attachment; filename=<name>` with the name query-escaped
fn content_disposition(filename: &str) -> String {
    let escaped: String = form_urlencoded::byte_serialize(filename.as_bytes()).collect();
    format!("attachment; filename={escaped}")
}
