//! WhoisXML full WHOIS record API client.
//!
//! The record endpoint returns the complete WHOIS record for a domain,
//! which carries the registration details used for rich notifications plus
//! two signals the availability endpoint lacks: an explicit "no record
//! exists" marker for unregistered domains, and data-completeness errors
//! when the registry record is broken. Registry data in this shape also
//! collapses the status list into one combined string.

use crate::error::DomainTrackerError;
use crate::status::{self, REGISTRY_DATA_ERROR_STATUS};
use crate::types::{DomainReport, DomainVerdict, RawStatusField};
use reqwest::StatusCode;
use std::time::Duration;

/// Endpoint for the WhoisXML WHOIS record service.
pub const WHOIS_RECORD_API_URL: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";

/// Data error value meaning no WHOIS record exists at all: the domain is
/// unregistered, which for a drop tracker means truly available.
pub const MISSING_WHOIS_DATA: &str = "MISSING_WHOIS_DATA";

/// Client for the full WHOIS record endpoint.
#[derive(Clone)]
pub struct RecordClient {
    /// HTTP client for API requests
    http_client: reqwest::Client,
    /// API key sent with every request
    api_key: String,
    /// Timeout for each lookup
    timeout: Duration,
}

impl RecordClient {
    /// Create a new record client with the default 10 second timeout.
    pub fn new<K: Into<String>>(api_key: K) -> Result<Self, DomainTrackerError> {
        Self::with_timeout(api_key, Duration::from_secs(10))
    }

    /// Create a new record client with a custom lookup timeout.
    pub fn with_timeout<K: Into<String>>(
        api_key: K,
        timeout: Duration,
    ) -> Result<Self, DomainTrackerError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2)) // Buffer for the HTTP layer
            .build()
            .map_err(|e| {
                DomainTrackerError::network_with_source(
                    "Failed to create record HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            timeout,
        })
    }

    /// Fetch the full WHOIS record and build an enhanced report.
    ///
    /// Total: lookup failures produce a report with the `has_error` marker
    /// set and a conservative unavailable verdict, so operators can tell
    /// "system degraded" apart from an ordinary unavailable domain.
    pub async fn domain_report(&self, domain: &str) -> DomainReport {
        let result = tokio::time::timeout(self.timeout, self.fetch(domain)).await;

        match result {
            Ok(Ok(json)) => report_from_record_response(domain, &json),
            Ok(Err(e)) => {
                tracing::error!(domain, error = %e, "WHOIS record lookup failed");
                DomainReport::lookup_failed(domain, e.to_string())
            }
            Err(_) => {
                tracing::error!(domain, timeout = ?self.timeout, "WHOIS record lookup timed out");
                DomainReport::lookup_failed(
                    domain,
                    format!("WHOIS record lookup timed out after {:?}", self.timeout),
                )
            }
        }
    }

    /// Perform the GET request and parse the body as JSON.
    async fn fetch(&self, domain: &str) -> Result<serde_json::Value, DomainTrackerError> {
        let response = self
            .http_client
            .get(WHOIS_RECORD_API_URL)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("domainName", domain),
                ("outputFormat", "JSON"),
                ("da", "1"),
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
                format!("WHOIS record API returned error: {}", code),
                code.as_u16(),
            )),
        }
    }
}

/// Build an enhanced report from a WHOIS record response body.
///
/// Decision order:
/// 1. No `WhoisRecord` at all: malformed, conservative unavailable.
/// 2. `dataError == MISSING_WHOIS_DATA` (top level or inside
///    `registryData`): unregistered, truly available, classification
///    bypassed entirely.
/// 3. Any other non-empty `dataError`: the registry record is incomplete,
///    unavailable with the [`REGISTRY_DATA_ERROR_STATUS`] sentinel.
/// 4. Otherwise classify the availability flag plus status field normally.
pub fn report_from_record_response(domain: &str, json: &serde_json::Value) -> DomainReport {
    let Some(record) = json.get("WhoisRecord") else {
        tracing::warn!(domain, "Record response missing WhoisRecord");
        return DomainReport::from_verdict(DomainVerdict::unavailable(domain));
    };

    if let Some(data_error) = extract_data_error(record) {
        if data_error.eq_ignore_ascii_case(MISSING_WHOIS_DATA) {
            // No record exists: the domain is unregistered
            return DomainReport::from_verdict(DomainVerdict::available(domain));
        }
        tracing::warn!(domain, data_error = %data_error, "Registry reported incomplete record data");
        return DomainReport::from_verdict(DomainVerdict::new(
            domain,
            false,
            vec![REGISTRY_DATA_ERROR_STATUS.to_string()],
        ));
    }

    let availability_flag = record
        .get("domainAvailability")
        .and_then(|v| v.as_str())
        .unwrap_or("UNAVAILABLE");

    let verdict = status::classify(domain, availability_flag, extract_record_status(record));

    let registrant = record.get("registrant");

    DomainReport {
        verdict,
        expiration_date: string_field(record, "expiresDate")
            .or_else(|| nested_string_field(record, "registryData", "expiresDate")),
        creation_date: string_field(record, "createdDate")
            .or_else(|| nested_string_field(record, "registryData", "createdDate")),
        registrar_name: string_field(record, "registrarName"),
        registrant_name: registrant.and_then(|r| string_field(r, "name")),
        registrant_organization: registrant.and_then(|r| string_field(r, "organization")),
        name_servers: extract_name_servers(record),
        has_error: false,
        error_message: None,
    }
}

/// Look for a data-completeness error, top level first, then registry data.
fn extract_data_error(record: &serde_json::Value) -> Option<String> {
    string_field(record, "dataError")
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            nested_string_field(record, "registryData", "dataError")
                .filter(|s| !s.trim().is_empty())
        })
}

/// Resolve the status field from a WHOIS record.
///
/// Registry data collapses statuses into one whitespace-separated string
/// with reference URLs; the top-level record sometimes carries a plain
/// array instead. Registry data wins when both are present.
fn extract_record_status(record: &serde_json::Value) -> RawStatusField {
    if let Some(raw) = nested_string_field(record, "registryData", "status") {
        return RawStatusField::Combined(raw);
    }

    super::availability::extract_status_field(record.get("status"))
}

fn string_field(value: &serde_json::Value, key: &str) -> Option<String> {
    value.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn nested_string_field(value: &serde_json::Value, outer: &str, key: &str) -> Option<String> {
    value.get(outer).and_then(|v| string_field(v, key))
}

/// Extract nameserver hostnames from `nameServers.hostNames`.
fn extract_name_servers(record: &serde_json::Value) -> Vec<String> {
    record
        .get("nameServers")
        .and_then(|ns| ns.get("hostNames"))
        .and_then(|names| names.as_array())
        .map(|names| {
            names
                .iter()
                .filter_map(|name| name.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(RecordClient::new("test-key").is_ok());
    }

    #[test]
    fn test_missing_whois_data_means_unregistered() {
        let json = serde_json::json!({
            "WhoisRecord": {
                "domainName": "example.com",
                "dataError": "MISSING_WHOIS_DATA"
            }
        });

        let report = report_from_record_response("example.com", &json);
        assert!(report.verdict.is_truly_available());
        assert!(report.verdict.problematic_statuses.is_empty());
        assert!(!report.has_error);
    }

    #[test]
    fn test_missing_data_inside_registry_data() {
        let json = serde_json::json!({
            "WhoisRecord": {
                "registryData": { "dataError": "MISSING_WHOIS_DATA" }
            }
        });

        let report = report_from_record_response("example.com", &json);
        assert!(report.verdict.is_truly_available());
    }

    #[test]
    fn test_other_data_error_is_flagged_not_available() {
        let json = serde_json::json!({
            "WhoisRecord": {
                "dataError": "INCOMPLETE_DATA"
            }
        });

        let report = report_from_record_response("example.com", &json);
        assert!(!report.verdict.is_truly_available());
        assert_eq!(
            report.verdict.problematic_statuses,
            vec![REGISTRY_DATA_ERROR_STATUS]
        );
    }

    #[test]
    fn test_combined_registry_status_string() {
        let json = serde_json::json!({
            "WhoisRecord": {
                "domainAvailability": "AVAILABLE",
                "registryData": {
                    "status": "pendingDelete https://icann.org/epp#pendingDelete \
                               redemptionPeriod https://icann.org/epp#redemptionPeriod"
                }
            }
        });

        let report = report_from_record_response("example.com", &json);
        assert!(report.verdict.registry_available);
        assert_eq!(
            report.verdict.problematic_statuses,
            vec!["pendingDelete", "redemptionPeriod"]
        );
        assert!(!report.verdict.is_truly_available());
    }

    #[test]
    fn test_registered_record_extracts_details() {
        let json = serde_json::json!({
            "WhoisRecord": {
                "domainAvailability": "UNAVAILABLE",
                "createdDate": "1995-08-14T04:00:00Z",
                "expiresDate": "2030-08-13T04:00:00Z",
                "registrarName": "Example Registrar Inc.",
                "registrant": {
                    "name": "Jane Holder",
                    "organization": "Example Org"
                },
                "nameServers": {
                    "hostNames": ["ns1.example.com", "ns2.example.com"]
                },
                "registryData": {
                    "status": "clientTransferProhibited https://icann.org/epp#clientTransferProhibited"
                }
            }
        });

        let report = report_from_record_response("example.com", &json);
        assert!(!report.verdict.is_truly_available());
        // Flag says unavailable, so classification is skipped entirely
        assert!(report.verdict.problematic_statuses.is_empty());
        assert_eq!(report.creation_date.as_deref(), Some("1995-08-14T04:00:00Z"));
        assert_eq!(report.expiration_date.as_deref(), Some("2030-08-13T04:00:00Z"));
        assert_eq!(report.registrar_name.as_deref(), Some("Example Registrar Inc."));
        assert_eq!(report.registrant_name.as_deref(), Some("Jane Holder"));
        assert_eq!(report.registrant_organization.as_deref(), Some("Example Org"));
        assert_eq!(report.name_servers, vec!["ns1.example.com", "ns2.example.com"]);
        assert!(!report.has_error);
    }

    #[test]
    fn test_dates_fall_back_to_registry_data() {
        let json = serde_json::json!({
            "WhoisRecord": {
                "domainAvailability": "UNAVAILABLE",
                "registryData": {
                    "createdDate": "2001-01-01T00:00:00Z",
                    "expiresDate": "2027-01-01T00:00:00Z"
                }
            }
        });

        let report = report_from_record_response("example.com", &json);
        assert_eq!(report.creation_date.as_deref(), Some("2001-01-01T00:00:00Z"));
        assert_eq!(report.expiration_date.as_deref(), Some("2027-01-01T00:00:00Z"));
    }

    #[test]
    fn test_malformed_record_response() {
        let json = serde_json::json!({ "unexpected": true });
        let report = report_from_record_response("example.com", &json);
        assert!(!report.verdict.is_truly_available());
        assert!(report.verdict.problematic_statuses.is_empty());
    }

    #[test]
    fn test_empty_data_error_ignored() {
        let json = serde_json::json!({
            "WhoisRecord": {
                "dataError": "",
                "domainAvailability": "AVAILABLE"
            }
        });

        let report = report_from_record_response("example.com", &json);
        assert!(report.verdict.is_truly_available());
    }
}
