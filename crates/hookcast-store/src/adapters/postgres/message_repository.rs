//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hookcast::{
    parse_embed_data, DeliveryOutcome, DomainError, EmbedData, InsertMessage, Message,
    MessageRepository, MessageStatus,
};

use super::error::map_sqlx_error;

/// PostgreSQL implementation of MessageRepository
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    webhook_id: Option<Uuid>,
    bot_username: String,
    avatar_url: Option<String>,
    embed_data: Option<serde_json::Value>,
    status: String,
    error: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    sent_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl TryFrom<MessageRow> for Message {
    type Error = DomainError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<MessageStatus>().map_err(|e| {
            DomainError::Persistence(format!("Message {} has invalid status: {}", row.id, e))
        })?;

        let embed_data = row
            .embed_data
            .as_ref()
            .map(parse_embed_data)
            .transpose()
            .map_err(|e| {
                DomainError::Persistence(format!(
                    "Message {} has invalid embed_data: {}",
                    row.id, e
                ))
            })?;

        Ok(Self {
            id: row.id,
            attributes: InsertMessage {
                webhook_id: row.webhook_id,
                bot_username: row.bot_username,
                avatar_url: row.avatar_url,
                embed_data,
                status,
                error: row.error,
            },
            created_at: row.created_at,
            sent_at: row.sent_at,
        })
    }
}

fn collect_messages(rows: Vec<MessageRow>) -> Result<Vec<Message>, DomainError> {
    rows.into_iter().map(Message::try_from).collect()
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, DomainError> {
        let row = sqlx::query_as::<_, MessageRow>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(Message::try_from).transpose()
    }

    async fn find_by_webhook(
        &self,
        webhook_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, DomainError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT * FROM messages WHERE webhook_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(webhook_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        collect_messages(rows)
    }

    async fn find_pending(&self, limit: i64) -> Result<Vec<Message>, DomainError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT * FROM messages WHERE status = 'pending' ORDER BY created_at ASC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        collect_messages(rows)
    }

    async fn insert(&self, message: &Message) -> Result<Message, DomainError> {
        let attributes = &message.attributes;
        let embed_json = attributes
            .embed_data
            .as_ref()
            .map(EmbedData::to_document)
            .transpose()
            .map_err(|e| {
                DomainError::Persistence(format!(
                    "Message {} has unserializable embed_data: {}",
                    message.id, e
                ))
            })?;

        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (id, webhook_id, bot_username, avatar_url, embed_data, status, error, created_at, sent_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(message.id)
        .bind(attributes.webhook_id)
        .bind(&attributes.bot_username)
        .bind(&attributes.avatar_url)
        .bind(embed_json)
        .bind(attributes.status.as_str())
        .bind(&attributes.error)
        .bind(message.created_at)
        .bind(message.sent_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.try_into()
    }

    async fn record_outcome(
        &self,
        id: Uuid,
        outcome: &DeliveryOutcome,
    ) -> Result<Message, DomainError> {
        let next = outcome.status();
        let sources: Vec<String> = MessageStatus::sources_for(next)
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        // Status check and write in one statement; a concurrent writer that
        // got there first makes this match zero rows.
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            UPDATE messages
            SET status = $2, error = $3, sent_at = $4
            WHERE id = $1 AND status = ANY($5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(next.as_str())
        .bind(outcome.error())
        .bind(outcome.sent_at())
        .bind(sources)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(row) => row.try_into(),
            None => {
                let current = self
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Message", id))?;
                tracing::warn!(
                    message_id = %id,
                    from = %current.status(),
                    to = %next,
                    "Status update rejected"
                );
                Err(DomainError::InvalidTransition {
                    from: current.status(),
                    to: next,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(status: &str, embed_data: Option<serde_json::Value>) -> MessageRow {
        MessageRow {
            id: Uuid::new_v4(),
            webhook_id: Some(Uuid::new_v4()),
            bot_username: "Bot".to_string(),
            avatar_url: None,
            embed_data,
            status: status.to_string(),
            error: None,
            created_at: chrono::Utc::now(),
            sent_at: None,
        }
    }

    #[test]
    fn test_row_maps_embed_through_validator() {
        let message = Message::try_from(row(
            "pending",
            Some(json!({"title": "Hi", "fields": [{"name": "a", "value": "b"}]})),
        ))
        .unwrap();

        let embed = message.attributes.embed_data.unwrap();
        assert_eq!(embed.title.as_deref(), Some("Hi"));
        assert!(!embed.fields[0].inline);
        assert_eq!(message.attributes.status, MessageStatus::Pending);
    }

    #[test]
    fn test_corrupt_rows_are_persistence_errors() {
        let err = Message::try_from(row("queued", None)).unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));

        let err = Message::try_from(row("sent", Some(json!({"fields": "nope"})))).unwrap_err();
        assert!(err.to_string().contains("embed_data"));
    }
}
