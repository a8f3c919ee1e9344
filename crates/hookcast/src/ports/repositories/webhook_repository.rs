//! Webhook Repository Port
//!
//! Abstract interface for Webhook persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Webhook;
use crate::domain::errors::DomainError;

/// Repository interface for Webhook entities
#[async_trait]
pub trait WebhookRepository: Send + Sync {
    /// Find a webhook by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Webhook>, DomainError>;

    /// Find all webhooks, newest first
    async fn find_all(&self) -> Result<Vec<Webhook>, DomainError>;

    /// Find webhooks eligible for dispatch
    async fn find_active(&self) -> Result<Vec<Webhook>, DomainError>;

    /// Insert a new webhook
    async fn insert(&self, webhook: &Webhook) -> Result<Webhook, DomainError>;

    /// Activate/deactivate a webhook
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<bool, DomainError>;

    /// Delete a webhook by ID
    ///
    /// Messages referencing it are handled according to the configured
    /// `WebhookDeletePolicy`.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
