//! Domain syntax validation and watchlist loading.
//!
//! The validator runs before any lookup is attempted so garbage input never
//! wastes API quota and resolves deterministically to "unavailable" instead
//! of undefined API behavior. The loader reads the domains watchlist file,
//! one domain per line.

use crate::error::DomainTrackerError;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

/// RFC length bound used by the pre-lookup guard.
pub const MAX_DOMAIN_LENGTH: usize = 253;

/// Practical bound applied to watchlist entries. Deliberately stricter than
/// the RFC limit: a tracked domain longer than this is almost certainly a
/// typo, and keeping the list short keeps alerts readable.
pub const WATCHLIST_MAX_DOMAIN_LENGTH: usize = 40;

lazy_static! {
    // Labels of 1-63 chars, alphanumeric with interior hyphens; the final
    // label (TLD) is letters only, minimum length 2.
    static ref DOMAIN_FORMAT_PATTERN: Regex = Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$"
    )
    .expect("domain format pattern is valid");
}

/// Validate basic domain syntax against the RFC length bound.
///
/// Pure and total: never panics, always returns a boolean.
pub fn is_valid_domain_format(domain: &str) -> bool {
    is_valid_domain_format_with_limit(domain, MAX_DOMAIN_LENGTH)
}

/// Validate basic domain syntax with a caller-chosen length bound.
///
/// All of the following must hold:
/// - non-empty after trimming
/// - total length within `max_len`
/// - no leading or trailing dot, at least one dot
/// - every dot-separated label is 1-63 alphanumeric characters with
///   interior hyphens; the TLD is letters only, at least 2 characters
pub fn is_valid_domain_format_with_limit(domain: &str, max_len: usize) -> bool {
    let domain = domain.trim();

    if domain.is_empty() || domain.len() > max_len {
        return false;
    }

    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    if !domain.contains('.') {
        return false;
    }

    DOMAIN_FORMAT_PATTERN.is_match(domain)
}

/// Load and validate the domain watchlist from a file.
///
/// The file contains one domain per line; blank lines and lines starting
/// with `#` are skipped as comments. Entries are lowercased, and anything
/// failing the syntax check with the practical length bound is silently
/// dropped.
///
/// # Errors
///
/// Returns `DomainTrackerError::FileError` if the file does not exist or
/// cannot be read.
pub fn load_domains<P: AsRef<Path>>(file_path: P) -> Result<Vec<String>, DomainTrackerError> {
    let path = file_path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        DomainTrackerError::file_error(
            path.to_string_lossy(),
            format!("Failed to read domains file: {}", e),
        )
    })?;

    let domains = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .filter(|domain| is_valid_domain_format_with_limit(domain, WATCHLIST_MAX_DOMAIN_LENGTH))
        .collect();

    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_accepts_well_formed_domains() {
        assert!(is_valid_domain_format("example.com"));
        assert!(is_valid_domain_format("sub.example.co.uk"));
        assert!(is_valid_domain_format("my-domain.org"));
        assert!(is_valid_domain_format("a1.io"));
        // Case-insensitive: mixed case accepted identically
        assert!(is_valid_domain_format("Example.COM"));
        assert!(is_valid_domain_format("  example.com  "));
    }

    #[test]
    fn test_rejects_malformed_domains() {
        assert!(!is_valid_domain_format(""));
        assert!(!is_valid_domain_format("   "));
        assert!(!is_valid_domain_format("not a domain"));
        assert!(!is_valid_domain_format("nodots"));
        assert!(!is_valid_domain_format(".example.com"));
        assert!(!is_valid_domain_format("example.com."));
        assert!(!is_valid_domain_format("-example.com"));
        assert!(!is_valid_domain_format("example-.com"));
        assert!(!is_valid_domain_format("example..com"));
        // TLD must be letters only, minimum 2 chars
        assert!(!is_valid_domain_format("example.c"));
        assert!(!is_valid_domain_format("example.123"));
    }

    #[test]
    fn test_rejects_overlong_labels() {
        let long_label = "a".repeat(64);
        assert!(!is_valid_domain_format(&format!("{}.com", long_label)));

        let max_label = "a".repeat(63);
        assert!(is_valid_domain_format(&format!("{}.com", max_label)));
    }

    #[test]
    fn test_length_limit_is_configurable() {
        let domain = format!("{}.com", "a".repeat(50));
        assert!(is_valid_domain_format(&domain));
        assert!(!is_valid_domain_format_with_limit(
            &domain,
            WATCHLIST_MAX_DOMAIN_LENGTH
        ));
    }

    #[test]
    fn test_load_domains_skips_comments_and_invalid_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# watched domains").unwrap();
        writeln!(file, "example.com").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  Mixed-Case.ORG  ").unwrap();
        writeln!(file, "not a domain").unwrap();
        writeln!(file, "{}.com", "a".repeat(50)).unwrap();
        file.flush().unwrap();

        let domains = load_domains(file.path()).unwrap();
        assert_eq!(domains, vec!["example.com", "mixed-case.org"]);
    }

    #[test]
    fn test_load_domains_missing_file() {
        let result = load_domains("definitely/not/a/real/path/domains.txt");
        assert!(matches!(
            result,
            Err(DomainTrackerError::FileError { .. })
        ));
    }
}
