//! # Domain Tracker Library
//!
//! Library for tracking domain availability via the WhoisXML API and
//! alerting a Slack webhook when a watched domain frees up.
//!
//! The heart of the crate is the status classification pipeline: raw
//! registry status text is normalized, matched against a known set of
//! problematic EPP statuses (with a keyword fallback for registry
//! variants), and combined with the service's coarse availability flag
//! into a three-way verdict: available, unavailable, or available but
//! still stuck in a grace/redemption/hold window. Getting this right is
//! what keeps alerts trustworthy; a coarse "AVAILABLE" flag alone produces
//! false positives for domains that are not actually registrable yet.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_tracker_lib::{DomainTracker, SlackNotifier, format_domain_message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tracker = DomainTracker::new("whoisxml-api-key")?;
//!     let notifier = SlackNotifier::new("https://hooks.slack.com/services/...")?;
//!
//!     let verdict = tracker.check_domain("example.com").await;
//!     if verdict.is_truly_available() {
//!         notifier.send_alert(&format_domain_message(&verdict)).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! - **Conservative by construction**: invalid input, malformed responses,
//!   and network failures all resolve to "not available" rather than an
//!   error; a false negative costs one sweep, a false positive wastes a
//!   registration attempt.
//! - **Two lookup shapes**: the availability endpoint (fast, coarse) and
//!   the full WHOIS record endpoint (registration details, unregistered
//!   and data-error markers), both classified by the same core.

// Re-export main public API types and functions
pub use config::{ConfigManager, DefaultsConfig, FileConfig, Settings};
pub use domains::{
    is_valid_domain_format, is_valid_domain_format_with_limit, load_domains, MAX_DOMAIN_LENGTH,
    WATCHLIST_MAX_DOMAIN_LENGTH,
};
pub use error::DomainTrackerError;
pub use notify::{format_domain_message, SlackNotifier};
pub use protocols::{
    report_from_record_response, verdict_from_availability_response, AvailabilityClient,
    RecordClient,
};
pub use status::{
    classify, extract_problematic_statuses, normalize_status_token, split_combined_status,
    REGISTRY_DATA_ERROR_STATUS,
};
pub use tracker::DomainTracker;
pub use types::{DomainReport, DomainVerdict, RawStatusField, TrackerConfig};

// Internal modules
mod config;
mod domains;
mod error;
mod notify;
mod protocols;
mod status;
mod tracker;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainTrackerError>;

// Library version metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
