//! Webhook Application Service (Use Case)
//!
//! Orchestrates domain operations for Webhook management.

use std::sync::Arc;
use uuid::Uuid;

use hookcast::{parse_insert_webhook, DomainError, Webhook, WebhookRepository};

/// Application service for Webhook operations
pub struct WebhookService<R: WebhookRepository> {
    repo: Arc<R>,
}

impl<R: WebhookRepository> WebhookService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a webhook from a client payload
    pub async fn create(&self, payload: &serde_json::Value) -> Result<Webhook, DomainError> {
        let webhook = Webhook::new(parse_insert_webhook(payload)?);
        let saved = self.repo.insert(&webhook).await?;

        tracing::info!(webhook_id = %saved.id, name = %saved.name(), "Created webhook");

        Ok(saved)
    }

    /// Get a webhook by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Webhook>, DomainError> {
        self.repo.find_by_id(id).await
    }

    /// Get all webhooks
    pub async fn list_all(&self) -> Result<Vec<Webhook>, DomainError> {
        self.repo.find_all().await
    }

    /// Get webhooks eligible for dispatch
    pub async fn list_active(&self) -> Result<Vec<Webhook>, DomainError> {
        self.repo.find_active().await
    }

    /// Activate or deactivate a webhook
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<(), DomainError> {
        if !self.repo.set_active(id, is_active).await? {
            return Err(DomainError::not_found("Webhook", id));
        }
        tracing::info!(webhook_id = %id, is_active, "Webhook activation changed");
        Ok(())
    }

    /// Delete a webhook
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!(webhook_id = %id, "Deleted webhook");
        }
        Ok(deleted)
    }
}
