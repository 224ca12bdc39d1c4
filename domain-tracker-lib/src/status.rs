//! Domain status normalization and classification.
//!
//! This is the decision core of the tracker. Registries attach EPP-style
//! status codes (e.g. `clientHold`, `pendingDelete`) to domains, and the
//! lookup service can flag a domain "AVAILABLE" while such a status still
//! keeps it in a grace, redemption, hold, or transfer window. The functions
//! here turn the heterogeneous raw status text into a deduplicated list of
//! canonical problematic status names, which combined with the coarse
//! availability flag yields the final verdict.
//!
//! All functions are pure and total: for any input they return a value,
//! never an error or a panic.

use crate::types::{DomainVerdict, RawStatusField};
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

/// Sentinel status used when the registry reports a data-completeness error
/// (incomplete or missing record data). Treated conservatively as not
/// available so a degraded registry never produces a false "available" alert.
pub const REGISTRY_DATA_ERROR_STATUS: &str = "registryDataError";

lazy_static! {
    /// Normalized status codes that indicate a domain is not truly available
    /// even when the registry's coarse flag says it is.
    static ref PROBLEMATIC_DOMAIN_STATUSES: HashSet<&'static str> = {
        [
            // Delete/expiration related statuses
            "pendingdelete",
            "redemptionperiod",
            "renewperiod",
            // Hold statuses
            "clienthold",
            "serverhold",
            // Transfer related statuses
            "transferperiod",
            "pendingtransfer",
            "clienttransferprohibited",
            "servertransferprohibited",
            // Update/delete restrictions that may indicate issues
            "clientdeleteprohibited",
            "serverdeleteprohibited",
            "clientupdateprohibited",
            "serverupdateprohibited",
            // Verification and registration issues
            "registrantverificationpending",
            "pendingverification",
            "pendingnotification",
            "addperiod",
            "autorenewperiod",
            // Additional transitional statuses
            "pendingcreate",
            "pendingupdate",
            "pendingrenew",
            "pendingrelease",
            "pendingrebill",
            "pendingrestore",
        ]
        .into_iter()
        .collect()
    };

    /// camelCase display renames for the most common problematic statuses.
    /// Statuses without an entry display as their normalized form.
    static ref STATUS_DISPLAY_NAMES: HashMap<&'static str, &'static str> = {
        [
            ("pendingdelete", "pendingDelete"),
            ("redemptionperiod", "redemptionPeriod"),
            ("clienthold", "clientHold"),
            ("serverhold", "serverHold"),
            ("renewperiod", "renewPeriod"),
            ("transferperiod", "transferPeriod"),
        ]
        .into_iter()
        .collect()
    };
}

/// Keyword fallback for statuses that miss the exact-match set. Order
/// matters: the first keyword found as a substring of the raw token wins,
/// so the listing below is the fixed precedence order.
const PROBLEMATIC_KEYWORDS: &[&str] = &[
    "pending",
    "hold",
    "prohibited",
    "redemption",
    "grace",
    "locked",
    "suspended",
    "expired",
    "quarantine",
    "frozen",
];

/// Split a combined status string into individual raw tokens.
///
/// Registry data sometimes collapses a whole status list into one
/// whitespace-separated string with ICANN reference URLs interleaved, e.g.
/// `"clientHold (https://www.icann.org/epp#clientHold) pendingDelete"`.
/// URL tokens are dropped and stray parentheses stripped.
pub fn split_combined_status(raw: &str) -> Vec<String> {
    raw.split_whitespace()
        .filter(|token| !token.starts_with("http"))
        .map(|token| token.trim_matches(|c| c == '(' || c == ')'))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Canonicalize one raw status token into a comparison-ready form.
///
/// Lowercases, truncates any parenthesized reference URL, and removes
/// spaces, hyphens, and underscores so `"client Update-Prohibited"` and
/// `"clientUpdateProhibited"` normalize identically. Returns `None` for
/// blank input. Idempotent: normalizing a normalized token is a no-op.
pub fn normalize_status_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut normalized = trimmed.to_lowercase();

    // Many statuses arrive like "clientHold (https://www.icann.org/epp#clientHold)"
    if let Some(paren) = normalized.find('(') {
        normalized.truncate(paren);
    }

    let normalized: String = normalized
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect();

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Resolve a normalized status code to its canonical display name.
fn display_status_name(normalized: &str) -> String {
    STATUS_DISPLAY_NAMES
        .get(normalized)
        .map(|name| name.to_string())
        .unwrap_or_else(|| normalized.to_string())
}

/// Resolve a matched keyword to a display name using the keyword-specific
/// sub-rules, checked against the lowercased original token.
fn keyword_status_name(keyword: &str, token_lower: &str) -> String {
    match keyword {
        "pending" if token_lower.contains("delete") => "pendingDelete".to_string(),
        "hold" => {
            if token_lower.contains("client") {
                "clientHold".to_string()
            } else if token_lower.contains("server") {
                "serverHold".to_string()
            } else {
                "hold".to_string()
            }
        }
        "redemption" => "redemptionPeriod".to_string(),
        "prohibited" => {
            if token_lower.contains("transfer") {
                "transferProhibited".to_string()
            } else if token_lower.contains("delete") {
                "deleteProhibited".to_string()
            } else if token_lower.contains("update") {
                "updateProhibited".to_string()
            } else {
                "prohibited".to_string()
            }
        }
        _ => title_case(keyword),
    }
}

/// Uppercase the first character, leaving the rest untouched.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Extract the ordered, deduplicated list of problematic status names from
/// a set of raw status tokens.
///
/// Each token is first normalized and checked against the exact-match set;
/// only when no exact match fires does the keyword fallback scan the
/// lowercased original token, first keyword wins. The result keeps only the
/// first occurrence of each resolved display name, in order of first
/// appearance across tokens.
pub fn extract_problematic_statuses(tokens: &[String]) -> Vec<String> {
    let mut found = Vec::new();

    for token in tokens {
        if token.trim().is_empty() {
            continue;
        }

        if let Some(normalized) = normalize_status_token(token) {
            if PROBLEMATIC_DOMAIN_STATUSES.contains(normalized.as_str()) {
                found.push(display_status_name(&normalized));
                continue;
            }
        }

        let token_lower = token.to_lowercase();
        for keyword in PROBLEMATIC_KEYWORDS {
            if token_lower.contains(keyword) {
                found.push(keyword_status_name(keyword, &token_lower));
                break;
            }
        }
    }

    // Dedupe while preserving first-seen order
    let mut seen = HashSet::new();
    found.retain(|name| seen.insert(name.clone()));
    found
}

/// Combine the registry's coarse availability flag with the status field
/// into the final verdict.
///
/// The classifier only refines an already-"available" flag: when the flag
/// is anything other than "AVAILABLE" (case-insensitive) the status field
/// is not consulted at all and the verdict is unavailable with an empty
/// problematic list.
pub fn classify(domain: &str, availability_flag: &str, status: RawStatusField) -> DomainVerdict {
    let registry_available = availability_flag.eq_ignore_ascii_case("AVAILABLE");

    if !registry_available {
        return DomainVerdict::unavailable(domain);
    }

    let tokens = status.into_tokens();
    let problematic = extract_problematic_statuses(&tokens);
    DomainVerdict::new(domain, true, problematic)
}
