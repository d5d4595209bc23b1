//! Polygon endpoint client.
//!
//! A lightweight client for the plotpin persistence endpoint. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Validating `PLOTPIN_API_BASE` for safety
//! - Posting submissions and fetching stored polygons as JSON
//!
//! The primary entry point is [`PlotpinClient`]. Create an instance via
//! [`PlotpinClient::from_env`]; it implements the collector crate's
//! [`SubmissionSink`] so it can be dropped into a capture session directly.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use plotpin_collector::{SubmissionSink, TransportError};
use plotpin_types::{Submission, wire::{PolygonRecord, SubmissionBody}};
use reqwest::{Client, Url, header};
use tracing::debug;

/// Environment variable overriding the endpoint base URL.
pub const API_BASE_ENV: &str = "PLOTPIN_API_BASE";
/// Default base URL for local development.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
/// Path of the polygon collection resource, for both POST and GET.
const POLYGONS_PATH: &str = "/polygons";

/// Hostnames allowed to use plain HTTP.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Thin wrapper around a configured `reqwest::Client` for the polygon
/// endpoint.
#[derive(Debug, Clone)]
pub struct PlotpinClient {
    pub base_url: String,
    pub http: Client,
}

impl PlotpinClient {
    /// Constructs a client from the environment.
    ///
    /// The base URL is taken from `PLOTPIN_API_BASE` (if set) or falls back
    /// to the local development default. Non-localhost hosts must use HTTPS.
    pub fn from_env() -> Result<Self, TransportError> {
        let base_url = env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.into());
        Self::new(base_url)
    }

    /// Constructs a client against an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TransportError::config(e.to_string()))?;

        Ok(Self { base_url, http })
    }

    fn endpoint(&self) -> String {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), POLYGONS_PATH);
        debug!(%url, "building request");
        url
    }
}

#[async_trait]
impl SubmissionSink for PlotpinClient {
    async fn submit(&self, submission: &Submission) -> Result<(), TransportError> {
        let body = SubmissionBody::from(submission);
        let response = self
            .http
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::status(status.as_u16(), body));
        }
        debug!(points = body.points.len(), "submission accepted");
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<PolygonRecord>, TransportError> {
        let response = self
            .http
            .get(self.endpoint())
            .send()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::status(status.as_u16(), body));
        }

        let records = response
            .json::<Vec<PolygonRecord>>()
            .await
            .map_err(|e| TransportError::decode(e.to_string()))?;
        debug!(count = records.len(), "fetched stored polygons");
        Ok(records)
    }
}

/// Validates that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
fn validate_base_url(base: &str) -> Result<(), TransportError> {
    let parsed = Url::parse(base).map_err(|e| TransportError::config(format!("invalid {API_BASE_ENV} URL '{base}': {e}")))?;

    let host_name = parsed
        .host_str()
        .ok_or_else(|| TransportError::config(format!("{API_BASE_ENV} must include a host")))?;

    // Local development allowance: localhost/127.0.0.1 with any scheme.
    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        return Err(TransportError::config(format!(
            "{API_BASE_ENV} must use https for non-localhost hosts; got '{}://'",
            parsed.scheme()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_localhost_with_any_scheme() {
        assert!(validate_base_url("http://localhost:8080").is_ok());
        assert!(validate_base_url("http://127.0.0.1:3000").is_ok());
        assert!(validate_base_url("https://localhost").is_ok());
    }

    #[test]
    fn rejects_plain_http_for_remote_hosts() {
        assert!(validate_base_url("http://polygons.example.com").is_err());
        assert!(validate_base_url("https://polygons.example.com").is_ok());
    }

    #[test]
    fn rejects_unparseable_urls() {
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("file:///tmp").is_err());
    }

    #[test]
    fn endpoint_joins_without_duplicate_slash() {
        let client = PlotpinClient::new("http://localhost:8080/").expect("client");
        assert_eq!(client.endpoint(), "http://localhost:8080/polygons");
    }

    #[test]
    fn from_env_falls_back_to_local_default() {
        let previous = env::var(API_BASE_ENV).ok();
        unsafe { env::remove_var(API_BASE_ENV) };
        let client = PlotpinClient::from_env().expect("client");
        assert_eq!(client.base_url, DEFAULT_API_BASE);
        if let Some(value) = previous {
            unsafe { env::set_var(API_BASE_ENV, value) };
        }
    }
}
