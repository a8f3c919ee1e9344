//! In-memory ports for service tests

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use hookcast::{
    parse_embed_data, DeliveryOutcome, DomainError, Message, MessageDispatcher,
    MessageRepository, MessageStatus, Webhook, WebhookRepository,
};

#[derive(Default)]
pub struct InMemoryWebhookRepository {
    rows: Mutex<Vec<Webhook>>,
}

#[async_trait]
impl WebhookRepository for InMemoryWebhookRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Webhook>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|w| w.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Webhook>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().rev().cloned().collect())
    }

    async fn find_active(&self) -> Result<Vec<Webhook>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().rev().filter(|w| w.is_active()).cloned().collect())
    }

    async fn insert(&self, webhook: &Webhook) -> Result<Webhook, DomainError> {
        self.rows.lock().unwrap().push(webhook.clone());
        Ok(webhook.clone())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<bool, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|w| w.id == id) {
            Some(webhook) => {
                webhook.attributes.is_active = is_active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|w| w.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    rows: Mutex<Vec<Message>>,
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_webhook(
        &self,
        webhook_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .filter(|m| m.webhook_id() == Some(webhook_id))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn find_pending(&self, limit: i64) -> Result<Vec<Message>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|m| m.status() == MessageStatus::Pending)
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn insert(&self, message: &Message) -> Result<Message, DomainError> {
        // Mirror the JSONB column: store the document form and read it back.
        let mut stored = message.clone();
        stored.attributes.embed_data = message
            .attributes
            .embed_data
            .as_ref()
            .map(|embed| {
                let stored = embed
                    .to_document()
                    .map_err(|e| DomainError::Persistence(e.to_string()))?;
                parse_embed_data(&stored).map_err(|e| DomainError::Persistence(e.to_string()))
            })
            .transpose()?;

        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn record_outcome(
        &self,
        id: Uuid,
        outcome: &DeliveryOutcome,
    ) -> Result<Message, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let message = rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DomainError::not_found("Message", id))?;
        message.apply(outcome)?;
        Ok(message.clone())
    }
}

/// Dispatcher returning a fixed outcome and recording what it was given
pub struct RecordingDispatcher {
    failure: Option<String>,
    calls: Mutex<Vec<(Uuid, Uuid)>>,
}

impl RecordingDispatcher {
    pub fn succeeding() -> Self {
        Self {
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            failure: Some(error.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(message_id, webhook_id)` pairs in call order
    pub fn calls(&self) -> Vec<(Uuid, Uuid)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageDispatcher for RecordingDispatcher {
    async fn dispatch(&self, message: &Message, webhook: &Webhook) -> DeliveryOutcome {
        self.calls.lock().unwrap().push((message.id, webhook.id));
        match &self.failure {
            Some(error) => DeliveryOutcome::failed(error.clone()),
            None => DeliveryOutcome::sent_now(),
        }
    }
}
