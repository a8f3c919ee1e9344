//! Hookcast Store
//!
//! PostgreSQL persistence for webhooks and messages, plus the application
//! services a request-handling layer calls with raw JSON payloads.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hookcast_store::{Store, StoreConfig};
//!
//! let store = Store::connect(&StoreConfig::from_env()?).await?;
//! let webhook = store.webhooks.create(&body).await?;
//! ```

pub mod adapters;
pub mod application;
pub mod config;

use std::sync::Arc;

use hookcast::{DomainError, WebhookDeletePolicy};
use sqlx::PgPool;

use adapters::{postgres, PgMessageRepository, PgWebhookRepository};
use application::{MessageService, WebhookService};

pub use config::{ConfigError, StoreConfig};

/// Type aliases for application services with concrete repository implementations
pub type AppWebhookService = WebhookService<PgWebhookRepository>;
pub type AppMessageService = MessageService<PgMessageRepository, PgWebhookRepository>;

/// Connected store shared across request handlers
#[derive(Clone)]
pub struct Store {
    pub pool: PgPool,
    pub webhooks: Arc<AppWebhookService>,
    pub messages: Arc<AppMessageService>,
}

impl Store {
    /// Connect, apply the schema and wire the services
    pub async fn connect(config: &StoreConfig) -> Result<Self, DomainError> {
        let pool = postgres::connect(config).await?;
        postgres::run_migrations(&pool).await?;

        let store = Self::from_pool(pool, config.webhook_delete_policy);
        tracing::info!(
            delete_policy = %config.webhook_delete_policy,
            "Hookcast store ready"
        );
        Ok(store)
    }

    /// Wire services over an existing pool
    pub fn from_pool(pool: PgPool, delete_policy: WebhookDeletePolicy) -> Self {
        let webhook_repo = Arc::new(PgWebhookRepository::new(pool.clone(), delete_policy));
        let message_repo = Arc::new(PgMessageRepository::new(pool.clone()));

        Self {
            pool,
            webhooks: Arc::new(WebhookService::new(webhook_repo.clone())),
            messages: Arc::new(MessageService::new(message_repo, webhook_repo)),
        }
    }
}
