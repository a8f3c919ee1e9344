//! Message Entity
//!
//! A unit of outbound content sent through a webhook, with its delivery
//! status. The status moves from `pending` to `sent` or `failed` as the
//! external dispatch process reports back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::EmbedData;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::MessageStatus;
use crate::validation::{parse, Document, FieldPath, ValidationError};

/// Client-supplied attributes of a message (the insert schema)
///
/// The `Option` fields map to nullable columns, so `null` reads as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertMessage {
    /// Lookup association, not ownership
    #[serde(default)]
    pub webhook_id: Option<Uuid>,
    /// Display name of the posting bot
    pub bot_username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub embed_data: Option<EmbedData>,
    #[serde(default = "InsertMessage::default_status")]
    pub status: MessageStatus,
    /// Failure detail; only set while `status` is `failed`
    #[serde(default)]
    pub error: Option<String>,
}

impl InsertMessage {
    pub const DEFAULT_STATUS: MessageStatus = MessageStatus::Pending;

    pub fn new(bot_username: impl Into<String>) -> Self {
        Self {
            webhook_id: None,
            bot_username: bot_username.into(),
            avatar_url: None,
            embed_data: None,
            status: Self::DEFAULT_STATUS,
            error: None,
        }
    }

    pub fn with_webhook(mut self, webhook_id: Uuid) -> Self {
        self.webhook_id = Some(webhook_id);
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    pub fn with_embed(mut self, embed: EmbedData) -> Self {
        self.embed_data = Some(embed);
        self
    }

    fn default_status() -> MessageStatus {
        Self::DEFAULT_STATUS
    }
}

impl Document for InsertMessage {
    fn check(&self) -> Result<(), ValidationError> {
        if self.error.is_some() && self.status != MessageStatus::Failed {
            return Err(ValidationError::inconsistent(
                FieldPath::root().key("error"),
                "error is only allowed when status is failed",
            ));
        }
        Ok(())
    }
}

/// Validate a client payload for a new message
///
/// `id`, `createdAt` and `sentAt` in the payload are ignored. `embedData`
/// goes through the embed document validator.
pub fn parse_insert_message(value: &Value) -> Result<InsertMessage, ValidationError> {
    parse(value)
}

/// Result reported by the dispatch process for one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent { at: DateTime<Utc> },
    Failed { error: String },
}

impl DeliveryOutcome {
    pub fn sent_now() -> Self {
        Self::Sent { at: Utc::now() }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn status(&self) -> MessageStatus {
        match self {
            Self::Sent { .. } => MessageStatus::Sent,
            Self::Failed { .. } => MessageStatus::Failed,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Sent { .. } => None,
            Self::Failed { error } => Some(error),
        }
    }

    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Sent { at } => Some(*at),
            Self::Failed { .. } => None,
        }
    }
}

/// Stored message record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    #[serde(flatten)]
    pub attributes: InsertMessage,
    /// Insert time
    pub created_at: DateTime<Utc>,
    /// Set when the message reaches `sent`
    pub sent_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Create a new record with a fresh id and creation time
    ///
    /// A message inserted as `sent` counts as sent at insert time.
    pub fn new(attributes: InsertMessage) -> Self {
        let created_at = Utc::now();
        let sent_at = (attributes.status == MessageStatus::Sent).then_some(created_at);
        Self {
            id: Uuid::new_v4(),
            attributes,
            created_at,
            sent_at,
        }
    }

    pub fn status(&self) -> MessageStatus {
        self.attributes.status
    }

    pub fn error(&self) -> Option<&str> {
        self.attributes.error.as_deref()
    }

    pub fn webhook_id(&self) -> Option<Uuid> {
        self.attributes.webhook_id
    }

    /// Apply a delivery outcome, enforcing the status lifecycle
    pub fn apply(&mut self, outcome: &DeliveryOutcome) -> Result<(), DomainError> {
        let next = outcome.status();
        if !self.status().can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status(),
                to: next,
            });
        }

        self.attributes.status = next;
        self.attributes.error = outcome.error().map(str::to_string);
        self.sent_at = outcome.sent_at();
        Ok(())
    }
}
