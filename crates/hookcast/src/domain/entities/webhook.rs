//! Webhook - Outbound Discord webhook endpoint
//!
//! A named delivery target that messages are sent through. Only active
//! webhooks are eligible for dispatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::validation::{parse, Document, ValidationError};

/// Client-supplied attributes of a webhook
///
/// This is the insert schema: it holds every column a client may set.
/// Server-managed columns live on [`Webhook`] only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertWebhook {
    /// Human-readable label
    pub name: String,
    /// Delivery target; not format-checked here
    pub url: String,
    /// Nullable column: `null` means the default
    #[serde(
        default = "InsertWebhook::default_is_active",
        deserialize_with = "InsertWebhook::is_active_or_default"
    )]
    pub is_active: bool,
}

impl InsertWebhook {
    pub const DEFAULT_IS_ACTIVE: bool = true;

    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            is_active: Self::DEFAULT_IS_ACTIVE,
        }
    }

    fn default_is_active() -> bool {
        Self::DEFAULT_IS_ACTIVE
    }

    fn is_active_or_default<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(Self::DEFAULT_IS_ACTIVE))
    }
}

impl Document for InsertWebhook {}

/// Validate a client payload for a new webhook
///
/// `id` and `createdAt` in the payload are ignored.
pub fn parse_insert_webhook(value: &Value) -> Result<InsertWebhook, ValidationError> {
    parse(value)
}

/// Stored webhook record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: Uuid,
    #[serde(flatten)]
    pub attributes: InsertWebhook,
    pub created_at: DateTime<Utc>,
}

impl Webhook {
    /// Create a new record with a fresh id and creation time
    pub fn new(attributes: InsertWebhook) -> Self {
        Self {
            id: Uuid::new_v4(),
            attributes,
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    pub fn url(&self) -> &str {
        &self.attributes.url
    }

    pub fn is_active(&self) -> bool {
        self.attributes.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_insert() {
        let insert =
            parse_insert_webhook(&json!({"name": "Alerts", "url": "https://example.com/hook"}))
                .unwrap();
        assert_eq!(insert, InsertWebhook::new("Alerts", "https://example.com/hook"));

        let before = Utc::now();
        let webhook = Webhook::new(insert);
        assert!(webhook.is_active());
        assert!(webhook.created_at >= before);
        assert_eq!(webhook.name(), "Alerts");
    }

    #[test]
    fn test_server_managed_fields_ignored() {
        let supplied_id = Uuid::new_v4();
        let insert = parse_insert_webhook(&json!({
            "id": supplied_id.to_string(),
            "createdAt": "1999-01-01T00:00:00Z",
            "name": "Alerts",
            "url": "https://example.com/hook"
        }))
        .unwrap();

        let webhook = Webhook::new(insert);
        assert_ne!(webhook.id, supplied_id);
        assert!(webhook.created_at.timestamp() > 946_684_800);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Webhook::new(InsertWebhook::new("a", "u"));
        let b = Webhook::new(InsertWebhook::new("a", "u"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_is_active_nullable() {
        let insert =
            parse_insert_webhook(&json!({"name": "n", "url": "u", "isActive": null})).unwrap();
        assert!(insert.is_active);

        let insert =
            parse_insert_webhook(&json!({"name": "n", "url": "u", "isActive": false})).unwrap();
        assert!(!insert.is_active);
    }

    #[test]
    fn test_required_columns() {
        let err = parse_insert_webhook(&json!({"url": "u"})).unwrap_err();
        assert_eq!(err.path.to_string(), "name");
        assert_eq!(err.reason.code(), "missing");

        let err = parse_insert_webhook(&json!({"name": "n", "url": null})).unwrap_err();
        assert_eq!(err.path.to_string(), "url");
        assert_eq!(err.reason.code(), "wrong_type");
    }

    #[test]
    fn test_serialized_shape() {
        let webhook = Webhook::new(InsertWebhook::new("Alerts", "https://example.com/hook"));
        let value = serde_json::to_value(&webhook).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["createdAt", "id", "isActive", "name", "url"]);
    }
}
