//! HTTP client for the Fathom events API.
//!
//! Implements [`EventRegistryClient`] on top of the two REST endpoints the
//! sync needs: listing a site's events page by page and creating an event.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::registry::{ApiErrorResponse, CreateEventRequest, EventRegistryClient, EventsPage};
use fathom_sync_core::errors::{Error, Result};
use fathom_sync_core::{EventName, RemoteEvent};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the Fathom API.
pub const DEFAULT_API_URL: &str = "https://api.usefathom.com/v1";

/// Number of events requested per page.
pub const PAGE_LIMIT: usize = 100;

/// HTTP client for one Fathom site.
///
/// # Example
///
/// ```ignore
/// let client = FathomApiClient::new(DEFAULT_API_URL, "ABCDEFG", "your-api-key")?;
/// let events = client.fetch_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct FathomApiClient {
    client: reqwest::Client,
    base_url: String,
    site_id: String,
    auth_header: HeaderValue,
}

impl FathomApiClient {
    /// Create a new Fathom API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the API (e.g., "https://api.usefathom.com/v1")
    /// * `site_id` - The Fathom site id
    /// * `api_key` - An API token with access to the site
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be used as a header value or the
    /// HTTP client cannot be initialized.
    pub fn new(base_url: &str, site_id: &str, api_key: &str) -> Result<Self> {
        let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| Error::RemoteUnavailable(format!("Invalid API key format: {}", e)))?;
        auth_header.set_sensitive(true);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                Error::RemoteUnavailable(format!("Failed to initialize HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            site_id: site_id.to_string(),
            auth_header,
        })
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    fn events_url(&self) -> String {
        format!(
            "{}/sites/{}/events",
            self.base_url,
            urlencoding::encode(&self.site_id)
        )
    }

    /// Create default headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }

    /// Parse an HTTP response, handling errors appropriately.
    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // Try to parse error response for a better message
            if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                if let Some(msg) = err.message.or(err.error) {
                    return Err(Error::RemoteUnavailable(format!(
                        "API error {}: {}",
                        status, msg
                    )));
                }
            }
            return Err(Error::RemoteUnavailable(format!(
                "API error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::RemoteUnavailable(format!(
                "Failed to parse response: {} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }
}

#[async_trait]
impl EventRegistryClient for FathomApiClient {
    async fn fetch_page(&self, cursor: &str) -> Result<EventsPage> {
        let url = format!(
            "{}?limit={}&starting_after={}",
            self.events_url(),
            PAGE_LIMIT,
            urlencoding::encode(cursor)
        );
        debug!("[FathomApi] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("Failed to fetch events: {}", e)))?;

        self.parse_response(response).await
    }

    async fn create_event(&self, name: &EventName) -> Result<RemoteEvent> {
        let url = self.events_url();
        debug!("[FathomApi] POST {} ({})", url, name);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(&CreateEventRequest { name })
            .send()
            .await
            .map_err(|e| {
                Error::RemoteUnavailable(format!("Failed to create event '{}': {}", name, e))
            })?;

        self.parse_response(response).await.map_err(|e| match e {
            Error::RemoteUnavailable(msg) => {
                Error::RemoteUnavailable(format!("Failed to create event '{}': {}", name, msg))
            }
            other => other,
        })
    }
}
