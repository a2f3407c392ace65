use async_trait::async_trait;
use domains::models::{Message, NewMessage};
use domains::{DomainResult, MessageRepository};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{db_err, SqliteStore};

const SELECT: &str =
    "SELECT id, conversation_id, conversation_label, sender, sender_name, text, timestamp FROM messages";

fn from_row(row: &SqliteRow) -> Result<Message, sqlx::Error> {
    Ok(Message {
        id: row.try_get("id")?,
        conversation_id: row.try_get("conversation_id")?,
        conversation_label: row.try_get("conversation_label")?,
        sender: row.try_get("sender")?,
        sender_name: row.try_get("sender_name")?,
        text: row.try_get("text")?,
        timestamp: row.try_get("timestamp")?,
    })
}

#[async_trait]
impl MessageRepository for SqliteStore {
    async fn append(&self, draft: NewMessage) -> DomainResult<Message> {
        let id = sqlx::query(
            "INSERT INTO messages (conversation_id, conversation_label, sender, sender_name, text, timestamp) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&draft.conversation_id)
        .bind(&draft.conversation_label)
        .bind(&draft.sender)
        .bind(&draft.sender_name)
        .bind(&draft.text)
        .bind(&draft.timestamp)
        .execute(&self.pool)
        .await
        .map_err(db_err)?
        .last_insert_rowid();
        Ok(Message::from_draft(id, draft))
    }

    async fn find_all(&self) -> DomainResult<Vec<Message>> {
        let rows = sqlx::query(&format!("{SELECT} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(from_row).collect::<Result<_, _>>().map_err(db_err)
    }

    async fn find_by_conversation(&self, conversation_id: &str) -> DomainResult<Vec<Message>> {
        let rows = sqlx::query(&format!("{SELECT} WHERE conversation_id = ? ORDER BY id ASC"))
            .bind(conversation_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(from_row).collect::<Result<_, _>>().map_err(db_err)
    }
}
