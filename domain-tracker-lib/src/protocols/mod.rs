//! Lookup clients for the WhoisXML API services.
//!
//! Two response shapes exist: the availability endpoint returns a coarse
//! flag plus a status list, while the full WHOIS record endpoint returns
//! registry data with combined status strings and data-error markers. Both
//! feed the same status classifier.

/// Domain Availability API client
pub mod availability;

/// Full WHOIS record API client
pub mod record;

// Re-export commonly used clients and parsing functions
pub use availability::{verdict_from_availability_response, AvailabilityClient};
pub use record::{report_from_record_response, RecordClient};
