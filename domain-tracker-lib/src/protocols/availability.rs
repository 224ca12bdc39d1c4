//! WhoisXML Domain Availability API client.
//!
//! This is the primary lookup path: a single GET per domain returning a
//! coarse availability flag plus the registry status codes. The response is
//! parsed into a [`DomainVerdict`] via the status classifier. Every failure
//! mode (transport, HTTP status, malformed JSON) resolves to a conservative
//! unavailable verdict; the client never surfaces an error for a lookup.

use crate::error::DomainTrackerError;
use crate::status;
use crate::types::{DomainVerdict, RawStatusField};
use reqwest::StatusCode;
use std::time::Duration;

/// Endpoint for the WhoisXML Domain Availability service.
pub const AVAILABILITY_API_URL: &str = "https://domain-availability.whoisxmlapi.com/api/v1";

/// Client for the domain availability endpoint.
#[derive(Clone)]
pub struct AvailabilityClient {
    /// HTTP client for API requests
    http_client: reqwest::Client,
    /// API key sent with every request
    api_key: String,
    /// Timeout for each lookup
    timeout: Duration,
}

impl AvailabilityClient {
    /// Create a new availability client with the default 30 second timeout.
    pub fn new<K: Into<String>>(api_key: K) -> Result<Self, DomainTrackerError> {
        Self::with_timeout(api_key, Duration::from_secs(30))
    }

    /// Create a new availability client with a custom lookup timeout.
    pub fn with_timeout<K: Into<String>>(
        api_key: K,
        timeout: Duration,
    ) -> Result<Self, DomainTrackerError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2)) // Buffer for the HTTP layer
            .build()
            .map_err(|e| {
                DomainTrackerError::network_with_source(
                    "Failed to create availability HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            timeout,
        })
    }

    /// Check a domain's availability.
    ///
    /// Total: always returns a verdict. Network failures, non-2xx responses,
    /// and malformed payloads all resolve to an unavailable verdict with an
    /// empty problematic list, logged at warn level.
    pub async fn check_domain(&self, domain: &str) -> DomainVerdict {
        let result = tokio::time::timeout(self.timeout, self.fetch(domain)).await;

        match result {
            Ok(Ok(json)) => verdict_from_availability_response(domain, &json),
            Ok(Err(e)) => {
                tracing::warn!(domain, error = %e, "Availability lookup failed");
                DomainVerdict::unavailable(domain)
            }
            Err(_) => {
                tracing::warn!(domain, timeout = ?self.timeout, "Availability lookup timed out");
                DomainVerdict::unavailable(domain)
            }
        }
    }

    /// Perform the GET request and parse the body as JSON.
    async fn fetch(&self, domain: &str) -> Result<serde_json::Value, DomainTrackerError> {
        let response = self
            .http_client
            .get(AVAILABILITY_API_URL)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("domainName", domain),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| DomainTrackerError::lookup(domain, format!("Request failed: {}", e)))?;

        match response.status() {
            StatusCode::OK => response.json::<serde_json::Value>().await.map_err(|e| {
                DomainTrackerError::lookup(domain, format!("Failed to parse JSON: {}", e))
            }),
            code => Err(DomainTrackerError::lookup_with_status(
                domain,
                format!("Availability API returned error: {}", code),
                code.as_u16(),
            )),
        }
    }
}

/// Build a verdict from an availability API response body.
///
/// Expected shape:
///
/// ```json
/// {
///   "DomainInfo": {
///     "domainAvailability": "AVAILABLE",
///     "domainName": "example.com",
///     "status": ["pendingDelete"]
///   }
/// }
/// ```
///
/// The `status` field may be an array of tokens, a single combined string,
/// or absent. Anything that does not match the expected shape degrades to
/// an unavailable verdict.
pub fn verdict_from_availability_response(
    domain: &str,
    json: &serde_json::Value,
) -> DomainVerdict {
    let Some(domain_info) = json.get("DomainInfo") else {
        tracing::warn!(domain, "Availability response missing DomainInfo");
        return DomainVerdict::unavailable(domain);
    };

    let availability_flag = domain_info
        .get("domainAvailability")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    let status_field = extract_status_field(domain_info.get("status"));

    status::classify(domain, availability_flag, status_field)
}

/// Resolve the raw `status` JSON value into the ingestion sum type.
pub(crate) fn extract_status_field(status: Option<&serde_json::Value>) -> RawStatusField {
    match status {
        Some(serde_json::Value::Array(items)) => RawStatusField::List(
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::to_string)
                .collect(),
        ),
        Some(serde_json::Value::String(raw)) => RawStatusField::Combined(raw.clone()),
        _ => RawStatusField::Absent,
    }
}
