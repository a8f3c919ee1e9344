//! Message Application Service (Use Case)
//!
//! Validates and records messages, and hands them to a dispatcher.

use std::sync::Arc;
use uuid::Uuid;

use hookcast::{
    parse_insert_message, DeliveryOutcome, DomainError, FieldPath, Message, MessageDispatcher,
    MessageRepository, MessageStatus, ValidationError, Webhook, WebhookRepository,
};

/// Application service for Message operations
pub struct MessageService<M: MessageRepository, W: WebhookRepository> {
    messages: Arc<M>,
    webhooks: Arc<W>,
}

impl<M: MessageRepository, W: WebhookRepository> MessageService<M, W> {
    pub fn new(messages: Arc<M>, webhooks: Arc<W>) -> Self {
        Self { messages, webhooks }
    }

    /// Create a message from a client payload
    ///
    /// `embedData` is validated as part of the payload. The webhook
    /// reference is checked by storage.
    pub async fn create(&self, payload: &serde_json::Value) -> Result<Message, DomainError> {
        let message = Message::new(parse_insert_message(payload)?);
        let saved = self.messages.insert(&message).await?;

        tracing::info!(
            message_id = %saved.id,
            webhook_id = ?saved.webhook_id(),
            status = %saved.status(),
            "Created message"
        );

        Ok(saved)
    }

    /// Get a message by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Message>, DomainError> {
        self.messages.find_by_id(id).await
    }

    /// Recent messages of a webhook, newest first
    pub async fn list_for_webhook(
        &self,
        webhook_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, DomainError> {
        self.messages
            .find_by_webhook(webhook_id, page_limit(limit)?)
            .await
    }

    /// Messages waiting for dispatch, oldest first
    pub async fn list_pending(&self, limit: i64) -> Result<Vec<Message>, DomainError> {
        self.messages.find_pending(page_limit(limit)?).await
    }

    /// Record the result of a delivery attempt
    pub async fn record_outcome(
        &self,
        id: Uuid,
        outcome: DeliveryOutcome,
    ) -> Result<Message, DomainError> {
        let updated = self.messages.record_outcome(id, &outcome).await?;

        match updated.error() {
            Some(error) => tracing::info!(message_id = %id, error = %error, "Message failed"),
            None => tracing::info!(message_id = %id, "Message sent"),
        }

        Ok(updated)
    }

    /// Deliver one message through its webhook and record the outcome
    ///
    /// The dispatcher is only called for a message that can still reach
    /// `sent` and whose webhook exists and is active. Otherwise the message
    /// is marked failed with the reason (or an error is returned if it is
    /// already sent).
    pub async fn dispatch(
        &self,
        id: Uuid,
        dispatcher: &dyn MessageDispatcher,
    ) -> Result<Message, DomainError> {
        let message = self
            .messages
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Message", id))?;

        if !message.status().can_transition_to(MessageStatus::Sent) {
            return Err(DomainError::InvalidTransition {
                from: message.status(),
                to: MessageStatus::Sent,
            });
        }

        let webhook = match self.resolve_webhook(&message).await? {
            Ok(webhook) => webhook,
            Err(reason) => {
                tracing::warn!(message_id = %id, reason = %reason, "Dispatch refused");
                return self.record_outcome(id, DeliveryOutcome::failed(reason)).await;
            }
        };

        let outcome = dispatcher.dispatch(&message, &webhook).await;
        self.record_outcome(id, outcome).await
    }

    /// The message's webhook, or the reason it cannot be used
    async fn resolve_webhook(
        &self,
        message: &Message,
    ) -> Result<Result<Webhook, String>, DomainError> {
        let Some(webhook_id) = message.webhook_id() else {
            return Ok(Err("message has no webhook".to_string()));
        };

        let resolved = match self.webhooks.find_by_id(webhook_id).await? {
            None => Err(format!("webhook {} not found", webhook_id)),
            Some(webhook) if !webhook.is_active() => {
                Err(format!("webhook {} is inactive", webhook_id))
            }
            Some(webhook) => Ok(webhook),
        };
        Ok(resolved)
    }
}

/// Smallest accepted page size for list queries
const MIN_PAGE_LIMIT: i64 = 1;

fn page_limit(limit: i64) -> Result<i64, DomainError> {
    if limit < MIN_PAGE_LIMIT {
        return Err(ValidationError::out_of_range(
            FieldPath::root().key("limit"),
            MIN_PAGE_LIMIT,
            limit,
        )
        .into());
    }
    Ok(limit)
}
