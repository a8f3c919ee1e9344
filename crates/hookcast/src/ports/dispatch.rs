//! Message Dispatch Port
//!
//! Interface for delivering a stored message to its webhook. Delivery
//! itself (HTTP, retries, rate limits) is implemented outside this crate.

use async_trait::async_trait;

use crate::domain::entities::{DeliveryOutcome, Message, Webhook};

/// Delivers one validated message through a resolved webhook
///
/// # Example
///
/// ```rust,ignore
/// use hookcast::ports::MessageDispatcher;
///
/// struct DiscordDispatcher { /* http client */ }
///
/// #[async_trait]
/// impl MessageDispatcher for DiscordDispatcher {
///     async fn dispatch(&self, message: &Message, webhook: &Webhook) -> DeliveryOutcome {
///         // POST the message to webhook.url()
///     }
/// }
/// ```
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    /// Attempt delivery once and report the outcome
    ///
    /// Transport failures are reported as `DeliveryOutcome::Failed`.
    async fn dispatch(&self, message: &Message, webhook: &Webhook) -> DeliveryOutcome;
}
