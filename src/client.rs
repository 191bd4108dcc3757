//! HTTP client for the admin panel
//!
//! Wraps a `reqwest` client whose cookie jar plays the part of the browser's
//! cookie store: seeded once from the configured cookie string, then kept up
//! to date by whatever the panel sets on its responses.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::cookie::{seed_jar, JarCookies};
use crate::errors::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the admin panel (e.g., "http://127.0.0.1:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Enable verbose request/response logging
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: "http://127.0.0.1:5000".to_string(), timeout: 30, verbose: false }
    }
}

/// Cookie-carrying HTTP client for the admin panel
#[derive(Debug, Clone)]
pub struct AdminClient {
    client: Client,
    config: ClientConfig,
    base: Url,
    jar: Arc<Jar>,
}

impl AdminClient {
    /// Create a client with an empty cookie jar
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_cookies(config, None)
    }

    /// Create a client whose jar starts out holding `cookies` for the panel
    pub fn with_cookies(config: ClientConfig, cookies: Option<&str>) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|err| {
            Error::config(format!("Invalid base URL '{}': {}", config.base_url, err))
        })?;

        let jar = Arc::new(Jar::default());
        if let Some(cookies) = cookies {
            seed_jar(&jar, cookies, &base);
        }

        // Redirects stay visible so a reload can report where the panel sent us.
        let client = Client::builder()
            .cookie_provider(jar.clone())
            .redirect(Policy::none())
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|err| Error::transport("Failed to build HTTP client", err))?;

        Ok(Self { client, config, base, jar })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Cookie store view over this client's jar
    pub fn cookie_store(&self) -> JarCookies {
        JarCookies::new(self.jar.clone(), self.base.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Build a GET request
    pub fn get(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("GET {}", url);

        self.client.get(&url)
    }

    /// Build a POST request
    pub fn post(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("POST {}", url);

        self.client.post(&url)
    }

    /// Send a body-less POST declared as JSON and deserialize the JSON reply
    pub async fn post_empty_json<R: DeserializeOwned>(
        &self,
        path: &str,
        headers: HeaderMap,
    ) -> Result<R> {
        let response = self
            .post(path)
            .header(CONTENT_TYPE, "application/json")
            .headers(headers)
            .send()
            .await
            .map_err(|err| Error::transport("Failed to send POST request", err))?;

        self.handle_response(response).await
    }

    /// Send a GET request and report the status, whatever it is
    pub async fn fetch_status(&self, path: &str) -> Result<StatusCode> {
        let response = self
            .get(path)
            .send()
            .await
            .map_err(|err| Error::transport("Failed to send GET request", err))?;

        let status = response.status();
        debug!("Response status: {}", status);
        Ok(status)
    }

    /// Handle HTTP response, checking status and deserializing JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "<unable to read error>".to_string());

            if self.config.verbose {
                trace!("Error response:\n{}", body);
            }

            return Err(Error::Status { status, body });
        }

        let body = response
            .text()
            .await
            .map_err(|err| Error::transport("Failed to read response body", err))?;

        if self.config.verbose {
            trace!("Response body:\n{}", body);
        }

        serde_json::from_str(&body).map_err(|source| Error::Decode { body, source })
    }
}
