//! Core data types for domain availability tracking.
//!
//! This module defines the main data structures used throughout the library:
//! the availability verdict, the raw status field as it arrives from the
//! lookup service, the enhanced domain report, and tracker configuration.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Final availability verdict for a single domain lookup.
///
/// A verdict is constructed once per lookup, immediately after the response
/// is parsed, and is immutable afterwards. Consumers must use
/// [`DomainVerdict::is_truly_available`] as the final answer; the coarse
/// `registry_available` flag alone is not sufficient because a domain can be
/// flagged available while still sitting in a grace or redemption window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainVerdict {
    /// The domain name that was checked, lowercase (e.g. "example.com").
    pub domain: String,

    /// Coarse availability flag reported by the lookup service, true iff the
    /// service's top-level field equals "AVAILABLE" (case-insensitive).
    pub registry_available: bool,

    /// Canonical display names of every problematic status found, in
    /// first-seen order with no duplicates. Empty when none were found.
    pub problematic_statuses: Vec<String>,
}

impl DomainVerdict {
    /// Build a verdict from its parts. The domain name is lowercased.
    pub fn new<D: Into<String>>(
        domain: D,
        registry_available: bool,
        problematic_statuses: Vec<String>,
    ) -> Self {
        Self {
            domain: domain.into().trim().to_lowercase(),
            registry_available,
            problematic_statuses,
        }
    }

    /// Conservative default: not available, no problematic statuses.
    ///
    /// Used for invalid input, malformed responses, and network failures.
    pub fn unavailable<D: Into<String>>(domain: D) -> Self {
        Self::new(domain, false, Vec::new())
    }

    /// Truly available: registry says available, no problematic statuses.
    pub fn available<D: Into<String>>(domain: D) -> Self {
        Self::new(domain, true, Vec::new())
    }

    /// Whether the domain is genuinely free for new registration.
    ///
    /// Always derived from the other two fields, never stored independently:
    /// `registry_available && problematic_statuses.is_empty()`.
    pub fn is_truly_available(&self) -> bool {
        self.registry_available && self.problematic_statuses.is_empty()
    }
}

impl Default for DomainVerdict {
    fn default() -> Self {
        Self::unavailable("")
    }
}

// Hand-written so the serialized form carries the derived
// `is_truly_available` value without ever storing it as a field.
impl Serialize for DomainVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DomainVerdict", 4)?;
        state.serialize_field("domain", &self.domain)?;
        state.serialize_field("registry_available", &self.registry_available)?;
        state.serialize_field("problematic_statuses", &self.problematic_statuses)?;
        state.serialize_field("is_truly_available", &self.is_truly_available())?;
        state.end()
    }
}

/// The domain status field exactly as the lookup service shapes it.
///
/// The WhoisXML APIs are inconsistent here: the availability endpoint returns
/// a JSON array of discrete tokens, while registry data in the full-record
/// endpoint collapses the whole list into one whitespace-separated string
/// with ICANN reference URLs interleaved. This sum type pins the ambiguity
/// down at the ingestion boundary; it is resolved into a single token list
/// before the normalizer ever sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawStatusField {
    /// Discrete tokens, one status code per element.
    List(Vec<String>),
    /// One combined string mixing status codes and URLs.
    Combined(String),
    /// No status field in the response.
    #[default]
    Absent,
}

impl RawStatusField {
    /// Resolve into a list of discrete raw tokens.
    ///
    /// `Combined` strings are split on whitespace with URL noise dropped;
    /// list elements pass through untouched.
    pub fn into_tokens(self) -> Vec<String> {
        match self {
            RawStatusField::List(tokens) => tokens,
            RawStatusField::Combined(raw) => crate::status::split_combined_status(&raw),
            RawStatusField::Absent => Vec::new(),
        }
    }
}

/// Enhanced domain information from the full WHOIS record lookup.
///
/// Wraps the availability verdict with the registration details used for
/// rich notification formatting. `has_error` distinguishes "system degraded,
/// check manually" from an ordinary unavailable verdict.
#[derive(Debug, Clone, Serialize, Default)]
pub struct DomainReport {
    /// The availability verdict for this domain.
    pub verdict: DomainVerdict,

    /// When the domain registration expires (ISO date string as reported).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    /// When the domain was first registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,

    /// The registrar that manages this domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar_name: Option<String>,

    /// Registered holder name, when the registry exposes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrant_name: Option<String>,

    /// Registered holder organization, when exposed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrant_organization: Option<String>,

    /// Nameservers associated with the domain.
    pub name_servers: Vec<String>,

    /// True when the lookup itself failed (network, transport, bad payload).
    pub has_error: bool,

    /// Error description when `has_error` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DomainReport {
    /// Report wrapping a verdict with no registration details.
    pub fn from_verdict(verdict: DomainVerdict) -> Self {
        Self {
            verdict,
            ..Self::default()
        }
    }

    /// Failed-lookup report: unavailable verdict plus the error marker.
    pub fn lookup_failed<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self {
            verdict: DomainVerdict::unavailable(domain),
            has_error: true,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Configuration options for domain tracking operations.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Timeout for availability API lookups. Default: 30 seconds.
    pub lookup_timeout: Duration,

    /// Timeout for full WHOIS record lookups. Default: 10 seconds.
    pub record_timeout: Duration,

    /// Maximum accepted domain length for the pre-lookup syntax guard.
    /// Default: 253 (the RFC bound). The watchlist loader applies its own
    /// stricter practical bound.
    pub max_domain_length: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(30),
            record_timeout: Duration::from_secs(10),
            max_domain_length: crate::domains::MAX_DOMAIN_LENGTH,
        }
    }
}

impl TrackerConfig {
    /// Set the availability lookup timeout.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Set the full-record lookup timeout.
    pub fn with_record_timeout(mut self, timeout: Duration) -> Self {
        self.record_timeout = timeout;
        self
    }

    /// Set the maximum domain length accepted before a lookup is attempted.
    pub fn with_max_domain_length(mut self, max_len: usize) -> Self {
        self.max_domain_length = max_len;
        self
    }
}
