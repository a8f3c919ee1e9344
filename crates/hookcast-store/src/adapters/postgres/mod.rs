//! PostgreSQL Repository Implementations

mod error;
mod message_repository;
mod pool;
mod webhook_repository;

pub use error::map_sqlx_error;
pub use message_repository::PgMessageRepository;
pub use pool::{connect, run_migrations};
pub use webhook_repository::PgWebhookRepository;
