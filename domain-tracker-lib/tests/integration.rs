// domain-tracker-lib/tests/integration.rs

//! Integration tests for domain-tracker-lib exports and the classification
//! pipeline driven through the public API.

use domain_tracker_lib::{
    classify, extract_problematic_statuses, format_domain_message, is_valid_domain_format,
    load_domains, normalize_status_token, report_from_record_response, split_combined_status,
    verdict_from_availability_response, DomainTracker, DomainVerdict, RawStatusField,
    TrackerConfig, MAX_DOMAIN_LENGTH, REGISTRY_DATA_ERROR_STATUS, WATCHLIST_MAX_DOMAIN_LENGTH,
};
use std::fs;
use tempfile::NamedTempFile;

#[test]
fn test_library_exports_work() {
    // Test that the core exports are accessible and behave

    assert_eq!(MAX_DOMAIN_LENGTH, 253);
    assert_eq!(WATCHLIST_MAX_DOMAIN_LENGTH, 40);
    assert_eq!(REGISTRY_DATA_ERROR_STATUS, "registryDataError");

    assert!(is_valid_domain_format("example.com"));
    assert!(!is_valid_domain_format("not a domain"));

    assert_eq!(
        normalize_status_token("Pending Delete (scheduled)"),
        Some("pendingdelete".to_string())
    );

    assert_eq!(
        split_combined_status("clientHold https://www.icann.org/epp#clientHold serverHold"),
        vec!["clientHold".to_string(), "serverHold".to_string()]
    );
}

#[test]
fn test_full_classification_pipeline_from_raw_statuses() {
    let statuses = extract_problematic_statuses(&[
        "pendingDelete".to_string(),
        "ok".to_string(),
        "redemptionPeriod".to_string(),
        "pendingDelete".to_string(), // duplicate must collapse
    ]);
    assert_eq!(statuses, vec!["pendingDelete", "redemptionPeriod"]);

    let verdict = classify(
        "Example.COM",
        "AVAILABLE",
        RawStatusField::List(vec!["pendingDelete".to_string()]),
    );
    assert_eq!(verdict.domain, "example.com");
    assert!(verdict.registry_available);
    assert!(!verdict.is_truly_available());
}

#[test]
fn test_availability_response_end_to_end() {
    let json = serde_json::json!({
        "DomainInfo": {
            "domainAvailability": "AVAILABLE",
            "domainName": "stuckdomain.com",
            "status": "pendingDelete redemptionPeriod"
        }
    });

    let verdict = verdict_from_availability_response("stuckdomain.com", &json);
    assert!(verdict.registry_available);
    assert_eq!(
        verdict.problematic_statuses,
        vec!["pendingDelete", "redemptionPeriod"]
    );
    assert!(!verdict.is_truly_available());

    let message = format_domain_message(&verdict);
    assert!(message.starts_with("⚠️"));
    assert!(message.contains("pendingDelete, redemptionPeriod"));
    assert!(message.contains("stuckdomain.com"));
}

#[test]
fn test_record_response_unregistered_domain_is_truly_available() {
    // The full-record endpoint marks unregistered domains with a data
    // error rather than an availability flag.
    let json = serde_json::json!({
        "WhoisRecord": {
            "domainName": "freedomain.com",
            "dataError": "MISSING_WHOIS_DATA"
        }
    });

    let report = report_from_record_response("freedomain.com", &json);
    assert!(report.verdict.is_truly_available());
    assert!(!report.has_error);

    let message = format_domain_message(&report.verdict);
    assert_eq!(message, "✅ Domain available: freedomain.com");
}

#[test]
fn test_record_response_registered_domain_with_details() {
    let json = serde_json::json!({
        "WhoisRecord": {
            "domainName": "taken.com",
            "domainAvailability": "UNAVAILABLE",
            "expiresDate": "2027-01-15T00:00:00Z",
            "createdDate": "1999-03-02T00:00:00Z",
            "registrarName": "Example Registrar, Inc.",
            "registryData": {
                "status": "clientTransferProhibited clientDeleteProhibited"
            }
        }
    });

    let report = report_from_record_response("taken.com", &json);
    assert!(!report.verdict.is_truly_available());
    // Unavailable domains never carry a problematic list.
    assert!(report.verdict.problematic_statuses.is_empty());
    assert_eq!(
        report.expiration_date.as_deref(),
        Some("2027-01-15T00:00:00Z")
    );
    assert_eq!(
        report.registrar_name.as_deref(),
        Some("Example Registrar, Inc.")
    );
}

#[test]
fn test_verdict_json_shape() {
    // Downstream consumers depend on the derived flag appearing in JSON.
    let verdict = DomainVerdict::new("example.com", true, vec!["clientHold".to_string()]);
    let json = serde_json::to_value(&verdict).unwrap();

    assert_eq!(json["domain"], "example.com");
    assert_eq!(json["registry_available"], true);
    assert_eq!(json["problematic_statuses"], serde_json::json!(["clientHold"]));
    assert_eq!(json["is_truly_available"], false);
}

#[test]
fn test_load_domains_filters_and_normalizes() {
    let file = NamedTempFile::new().unwrap();
    fs::write(
        file.path(),
        "# watchlist\nExample.COM\n\n  openai.com  \nnot a domain\nthis-domain-name-is-way-over-the-watchlist-bound.com\n",
    )
    .unwrap();

    let domains = load_domains(file.path()).unwrap();
    assert_eq!(domains, vec!["example.com", "openai.com"]);
}

#[tokio::test]
async fn test_tracker_rejects_invalid_domains_without_network() {
    let tracker = DomainTracker::new("test-key").unwrap();

    // Garbage input resolves immediately to the conservative default;
    // no API call is made so this is safe offline.
    let verdict = tracker.check_domain("definitely not a domain").await;
    assert!(!verdict.is_truly_available());
    assert!(verdict.problematic_statuses.is_empty());

    let verdicts = tracker
        .check_domains(&["".to_string(), "no-tld".to_string()])
        .await;
    assert_eq!(verdicts.len(), 2);
    assert!(verdicts.iter().all(|v| !v.is_truly_available()));
}

#[test]
fn test_tracker_config_builder() {
    let config = TrackerConfig::default()
        .with_lookup_timeout(std::time::Duration::from_secs(5))
        .with_max_domain_length(WATCHLIST_MAX_DOMAIN_LENGTH);

    assert_eq!(config.lookup_timeout, std::time::Duration::from_secs(5));
    assert_eq!(config.max_domain_length, 40);
}

/// Classification is pure and deterministic: rerunning the extraction on
/// its own output must be a fixed point.
#[test]
fn test_extraction_idempotent_over_own_output() {
    let raw = vec![
        "clientHold".to_string(),
        "pendingDelete (scheduled)".to_string(),
        "serverTransferProhibited https://icann.org/epp".to_string(),
    ];

    let first = extract_problematic_statuses(&raw);
    let second = extract_problematic_statuses(&first);
    assert_eq!(first, second);
}
