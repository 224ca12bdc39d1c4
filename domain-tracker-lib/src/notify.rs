//! Slack notification client for domain availability alerts.
//!
//! Sends plain-text messages to a Slack incoming webhook. Delivery is best
//! effort: a dropped alert must never abort a sweep, so the safe variant
//! logs failures instead of propagating them.

use crate::error::DomainTrackerError;
use crate::status::REGISTRY_DATA_ERROR_STATUS;
use crate::types::DomainVerdict;
use std::time::Duration;

/// Timeout for webhook delivery.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent with webhook requests.
const USER_AGENT: &str = concat!("domain-tracker/", env!("CARGO_PKG_VERSION"));

/// How much of a message to include in debug logs.
const MAX_MESSAGE_PREVIEW_LENGTH: usize = 50;

// Message templates
const AVAILABLE_DOMAIN_MESSAGE: &str = "✅ Domain available";
const UNAVAILABLE_DOMAIN_MESSAGE: &str = "❌ Domain NOT available";

/// Client for a Slack incoming webhook.
#[derive(Clone)]
pub struct SlackNotifier {
    /// HTTP client for webhook requests
    http_client: reqwest::Client,
    /// The webhook URL alerts are posted to
    webhook_url: String,
}

impl SlackNotifier {
    /// Create a new notifier for the given webhook URL.
    pub fn new<U: Into<String>>(webhook_url: U) -> Result<Self, DomainTrackerError> {
        let http_client = reqwest::Client::builder()
            .timeout(NOTIFY_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                DomainTrackerError::network_with_source(
                    "Failed to create Slack HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            webhook_url: webhook_url.into(),
        })
    }

    /// Send an alert message to the webhook.
    ///
    /// # Errors
    ///
    /// Returns `DomainTrackerError::NotifyError` on transport failures or
    /// non-2xx responses. An unexpected (non-"ok") body is only logged,
    /// since Slack delivered the message.
    pub async fn send_alert(&self, message: &str) -> Result<(), DomainTrackerError> {
        let response = self
            .http_client
            .post(&self.webhook_url)
            .json(&serde_json::json!({ "text": message }))
            .send()
            .await
            .map_err(|e| DomainTrackerError::notify(format!("Webhook request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainTrackerError::notify(format!(
                "Webhook returned HTTP {}",
                status
            )));
        }

        // Slack answers a plain "ok" on success
        let body = response.text().await.unwrap_or_default();
        if body.trim() != "ok" {
            tracing::warn!(response = %body.trim(), "Slack returned unexpected response");
        }

        tracing::debug!(
            message = %message_preview(message),
            "Successfully sent Slack alert"
        );

        Ok(())
    }

    /// Send an alert, logging any failure instead of returning it.
    pub async fn send_alert_safely(&self, message: &str) {
        if let Err(e) = self.send_alert(message).await {
            tracing::error!(error = %e, "Failed to send Slack alert");
        }
    }
}

/// Render the alert message for a verdict.
///
/// Truly available domains get the highlight; domains the registry flags
/// available but which still carry problematic statuses get the warning
/// form naming those statuses; a registry data error gets its own degraded
/// phrasing so operators can tell "check manually" apart from an ordinary
/// unavailable domain; everything else is a plain unavailable line.
pub fn format_domain_message(verdict: &DomainVerdict) -> String {
    if verdict.is_truly_available() {
        format!("{}: {}", AVAILABLE_DOMAIN_MESSAGE, verdict.domain)
    } else if verdict
        .problematic_statuses
        .iter()
        .any(|s| s == REGISTRY_DATA_ERROR_STATUS)
    {
        format!(
            "🚨 Status check degraded for {}: registry returned incomplete record data. Check manually.",
            verdict.domain
        )
    } else if !verdict.problematic_statuses.is_empty() {
        format!(
            "⚠️ Domain appears available but still in {}: {}. May not be fully released yet.",
            verdict.problematic_statuses.join(", "),
            verdict.domain
        )
    } else {
        format!("{}: {}", UNAVAILABLE_DOMAIN_MESSAGE, verdict.domain)
    }
}

fn message_preview(message: &str) -> String {
    if message.chars().count() > MAX_MESSAGE_PREVIEW_LENGTH {
        let preview: String = message.chars().take(MAX_MESSAGE_PREVIEW_LENGTH).collect();
        format!("{}...", preview)
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_creation() {
        assert!(SlackNotifier::new("https://hooks.slack.com/services/T/B/x").is_ok());
    }

    #[test]
    fn test_message_for_available_domain() {
        let verdict = DomainVerdict::available("example.com");
        assert_eq!(
            format_domain_message(&verdict),
            "✅ Domain available: example.com"
        );
    }

    #[test]
    fn test_message_for_unavailable_domain() {
        let verdict = DomainVerdict::unavailable("example.com");
        assert_eq!(
            format_domain_message(&verdict),
            "❌ Domain NOT available: example.com"
        );
    }

    #[test]
    fn test_message_for_problematic_domain() {
        let verdict = DomainVerdict::new(
            "example.com",
            true,
            vec!["pendingDelete".to_string(), "clientHold".to_string()],
        );
        assert_eq!(
            format_domain_message(&verdict),
            "⚠️ Domain appears available but still in pendingDelete, clientHold: example.com. \
             May not be fully released yet."
        );
    }

    #[test]
    fn test_message_for_registry_data_error() {
        let verdict = DomainVerdict::new(
            "example.com",
            false,
            vec![REGISTRY_DATA_ERROR_STATUS.to_string()],
        );

        let message = format_domain_message(&verdict);
        assert!(message.starts_with("🚨"));
        assert!(message.contains("example.com"));
        assert!(message.contains("Check manually"));
        // Must not claim the domain appears available
        assert!(!message.contains("appears available"));
    }

    #[test]
    fn test_message_preview_truncation() {
        let long = "x".repeat(80);
        let preview = message_preview(&long);
        assert_eq!(preview.chars().count(), MAX_MESSAGE_PREVIEW_LENGTH + 3);
        assert!(preview.ends_with("..."));

        assert_eq!(message_preview("short"), "short");
    }
}
