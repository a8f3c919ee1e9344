//! Message Repository Port
//!
//! Abstract interface for Message persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{DeliveryOutcome, Message};
use crate::domain::errors::DomainError;

/// Repository interface for Message entities
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find a message by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, DomainError>;

    /// Find recent messages sent through a webhook
    async fn find_by_webhook(
        &self,
        webhook_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, DomainError>;

    /// Find pending messages, oldest first
    async fn find_pending(&self, limit: i64) -> Result<Vec<Message>, DomainError>;

    /// Insert a new message
    async fn insert(&self, message: &Message) -> Result<Message, DomainError>;

    /// Apply a delivery outcome as one atomic update
    ///
    /// The write only happens if the stored status may transition to the
    /// outcome's status at the time of the update. Otherwise returns
    /// `InvalidTransition` (or `NotFound` if the message is gone).
    async fn record_outcome(
        &self,
        id: Uuid,
        outcome: &DeliveryOutcome,
    ) -> Result<Message, DomainError>;
}
