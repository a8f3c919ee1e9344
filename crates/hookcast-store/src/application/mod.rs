//! Application Layer (Use Cases)
//!
//! Validates client payloads and coordinates repositories and the
//! dispatch port.

mod message_service;
mod webhook_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use message_service::MessageService;
pub use webhook_service::WebhookService;
