//! Domain Entities
//!
//! - Webhook: Outbound delivery endpoint
//! - Message: Content sent through a webhook, with delivery status
//! - Embed: Rich content document stored inside a message

mod embed;
mod message;
mod webhook;

pub use embed::*;
pub use message::*;
pub use webhook::*;
