//! PostgreSQL implementation of WebhookRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hookcast::{DomainError, InsertWebhook, Webhook, WebhookDeletePolicy, WebhookRepository};

use super::error::map_sqlx_error;

/// PostgreSQL implementation of WebhookRepository
pub struct PgWebhookRepository {
    pool: PgPool,
    delete_policy: WebhookDeletePolicy,
}

impl PgWebhookRepository {
    pub fn new(pool: PgPool, delete_policy: WebhookDeletePolicy) -> Self {
        Self {
            pool,
            delete_policy,
        }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct WebhookRow {
    id: Uuid,
    name: String,
    url: String,
    is_active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<WebhookRow> for Webhook {
    fn from(row: WebhookRow) -> Self {
        Self {
            id: row.id,
            attributes: InsertWebhook {
                name: row.name,
                url: row.url,
                is_active: row.is_active,
            },
            created_at: row.created_at,
        }
    }
}

/// Statement run on referencing messages before the webhook row is deleted
///
/// `Restrict` runs nothing and lets the foreign key reject the delete.
fn detach_statement(policy: WebhookDeletePolicy) -> Option<&'static str> {
    match policy {
        WebhookDeletePolicy::Restrict => None,
        WebhookDeletePolicy::Cascade => Some("DELETE FROM messages WHERE webhook_id = $1"),
        WebhookDeletePolicy::SetNull => {
            Some("UPDATE messages SET webhook_id = NULL WHERE webhook_id = $1")
        }
    }
}

#[async_trait]
impl WebhookRepository for PgWebhookRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Webhook>, DomainError> {
        let row = sqlx::query_as::<_, WebhookRow>("SELECT * FROM webhooks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Webhook>, DomainError> {
        let rows =
            sqlx::query_as::<_, WebhookRow>("SELECT * FROM webhooks ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_active(&self) -> Result<Vec<Webhook>, DomainError> {
        let rows = sqlx::query_as::<_, WebhookRow>(
            "SELECT * FROM webhooks WHERE is_active = true ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, webhook: &Webhook) -> Result<Webhook, DomainError> {
        let row = sqlx::query_as::<_, WebhookRow>(
            r#"
            INSERT INTO webhooks (id, name, url, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(webhook.id)
        .bind(&webhook.attributes.name)
        .bind(&webhook.attributes.url)
        .bind(webhook.attributes.is_active)
        .bind(webhook.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE webhooks SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // Blocks concurrent message inserts that reference this webhook.
        let locked =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM webhooks WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;

        if locked.is_none() {
            return Ok(false);
        }

        if let Some(statement) = detach_statement(self.delete_policy) {
            let detached = sqlx::query(statement)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
            tracing::debug!(
                webhook_id = %id,
                policy = %self.delete_policy,
                messages = detached.rows_affected(),
                "Detached messages from webhook"
            );
        }

        let result = sqlx::query("DELETE FROM webhooks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
