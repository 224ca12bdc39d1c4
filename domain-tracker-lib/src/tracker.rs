//! Main domain tracker implementation.
//!
//! This module provides the primary `DomainTracker` struct that coordinates
//! validation, lookup, and classification for single domains and watchlists.

use crate::domains::is_valid_domain_format_with_limit;
use crate::error::DomainTrackerError;
use crate::protocols::{AvailabilityClient, RecordClient};
use crate::types::{DomainReport, DomainVerdict, TrackerConfig};
use futures_util::stream::{Stream, StreamExt};
use std::pin::Pin;

/// Coordinates domain availability checks.
///
/// The tracker validates each domain's syntax before spending API quota,
/// runs the availability lookup, and classifies the result into a verdict.
/// Every check is total: invalid input, network failures, and malformed
/// responses all resolve to a conservative unavailable verdict rather than
/// an error.
///
/// # Example
///
/// ```rust,no_run
/// use domain_tracker_lib::DomainTracker;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let tracker = DomainTracker::new("api-key")?;
///     let verdict = tracker.check_domain("example.com").await;
///     println!("{}: {}", verdict.domain, verdict.is_truly_available());
///     Ok(())
/// }
/// ```
pub struct DomainTracker {
    /// Configuration settings for this tracker instance
    config: TrackerConfig,
    /// Client for the availability endpoint
    availability_client: AvailabilityClient,
    /// Client for the full WHOIS record endpoint
    record_client: RecordClient,
}

impl DomainTracker {
    /// Create a new tracker with default configuration.
    pub fn new<K: Into<String>>(api_key: K) -> Result<Self, DomainTrackerError> {
        Self::with_config(api_key, TrackerConfig::default())
    }

    /// Create a new tracker with custom configuration.
    pub fn with_config<K: Into<String>>(
        api_key: K,
        config: TrackerConfig,
    ) -> Result<Self, DomainTrackerError> {
        let api_key = api_key.into();
        let availability_client =
            AvailabilityClient::with_timeout(api_key.clone(), config.lookup_timeout)?;
        let record_client = RecordClient::with_timeout(api_key, config.record_timeout)?;

        Ok(Self {
            config,
            availability_client,
            record_client,
        })
    }

    /// Check availability of a single domain.
    ///
    /// Syntactically invalid domains are rejected before any network call
    /// and resolve to an unavailable verdict.
    pub async fn check_domain(&self, domain: &str) -> DomainVerdict {
        if !is_valid_domain_format_with_limit(domain, self.config.max_domain_length) {
            tracing::warn!(domain, "Skipping lookup for invalid domain syntax");
            return DomainVerdict::unavailable(domain);
        }

        self.availability_client.check_domain(domain).await
    }

    /// Fetch the enhanced report for a single domain via the full WHOIS
    /// record endpoint. Includes registration details for notification
    /// formatting and an explicit error marker for failed lookups.
    pub async fn domain_report(&self, domain: &str) -> DomainReport {
        if !is_valid_domain_format_with_limit(domain, self.config.max_domain_length) {
            tracing::warn!(domain, "Skipping record lookup for invalid domain syntax");
            return DomainReport::from_verdict(DomainVerdict::unavailable(domain));
        }

        self.record_client.domain_report(domain).await
    }

    /// Check a batch of domains strictly sequentially, preserving input
    /// order in the returned verdicts.
    pub async fn check_domains(&self, domains: &[String]) -> Vec<DomainVerdict> {
        let mut results = Vec::with_capacity(domains.len());

        for domain in domains {
            results.push(self.check_domain(domain).await);
        }

        results
    }

    /// Check a batch of domains, yielding verdicts as a stream in input
    /// order. Useful for displaying progress while a sweep runs.
    pub fn check_domains_stream<'a>(
        &'a self,
        domains: &[String],
    ) -> Pin<Box<dyn Stream<Item = DomainVerdict> + Send + 'a>> {
        let domains = domains.to_vec();
        let stream = futures_util::stream::iter(domains)
            .then(move |domain| async move { self.check_domain(&domain).await });

        Box::pin(stream)
    }

    /// Get the current configuration for this tracker.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_domain_skips_lookup() {
        let tracker = DomainTracker::new("test-key").unwrap();

        // No network call is made for garbage input, so this resolves
        // immediately with the conservative default.
        let verdict = tracker.check_domain("not a domain").await;
        assert!(!verdict.is_truly_available());
        assert!(verdict.problematic_statuses.is_empty());

        let verdict = tracker.check_domain("").await;
        assert!(!verdict.is_truly_available());
    }

    #[tokio::test]
    async fn test_invalid_domain_report_has_no_error_marker() {
        let tracker = DomainTracker::new("test-key").unwrap();

        let report = tracker.domain_report("nodots").await;
        assert!(!report.verdict.is_truly_available());
        assert!(!report.has_error);
    }

    #[test]
    fn test_tracker_respects_configured_length_bound() {
        let config = TrackerConfig::default().with_max_domain_length(10);
        let tracker = DomainTracker::with_config("test-key", config).unwrap();
        assert_eq!(tracker.config().max_domain_length, 10);
    }
}
