//! Hookcast Domain Library
//!
//! Core types and interfaces for sending Discord webhook messages.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Webhook and Message records, embed document model
//!   - `value_objects/`: MessageStatus, SeparatorSpacing, WebhookDeletePolicy
//!   - `errors/`: Domain-specific error types
//!
//! - **Validation** (`validation/`): Untyped JSON to typed documents,
//!   with path-carrying errors
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `dispatch`: Delivery interface implemented by the sender
//!
//! # Usage
//!
//! ```rust,ignore
//! use hookcast::{parse_insert_message, Message};
//!
//! let insert = parse_insert_message(&body)?;
//! let message = Message::new(insert);
//! ```

pub mod domain;
pub mod ports;
pub mod validation;

// Re-export commonly used types
pub use domain::{
    parse_embed_data, parse_insert_message, parse_insert_webhook, ConstraintKind, ContainerData,
    DeliveryOutcome, DomainError, EmbedData, EmbedField, InsertMessage, InsertWebhook, Message,
    MessageStatus, SectionData, SeparatorData, SeparatorSpacing, ThumbnailData, Webhook,
    WebhookDeletePolicy,
};
pub use ports::{MessageDispatcher, MessageRepository, WebhookRepository};
pub use validation::{parse, Document, FieldPath, ValidationError, ValidationReason};
