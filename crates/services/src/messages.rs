//! Posting messages and reading conversations.

use std::sync::Arc;

use domains::models::{ConversationSummary, Message, NewMessage};
use domains::{DomainResult, MessageRepository};
use tracing::{debug, info};

use crate::conversation::summarize;

#[derive(Clone)]
pub struct MessageService {
    repo: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        Self { repo }
    }

    pub async fn post(&self, draft: NewMessage) -> DomainResult<Message> {
        let message = self.repo.append(draft).await?;
        info!(id = message.id, conversation = %message.conversation_id, "message posted");
        Ok(message)
    }

    /// Every message of `conversation_id`, oldest first. Empty when unknown.
    pub async fn conversation(&self, conversation_id: &str) -> DomainResult<Vec<Message>> {
        let mut messages = self.repo.find_by_conversation(conversation_id).await?;
        messages.sort_by_key(|m| m.id);
        debug!(conversation = %conversation_id, count = messages.len(), "loaded conversation");
        Ok(messages)
    }

    /// One summary per conversation, ordered by each conversation's oldest
    /// message.
    pub async fn conversations(&self) -> DomainResult<Vec<ConversationSummary>> {
        let mut all = self.repo.find_all().await?;
        all.sort_by_key(|m| m.id);
        Ok(summarize(&all))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{DomainError, MockMessageRepository};

    fn msg(id: i64, conv: &str, text: &str) -> Message {
        Message {
            id,
            conversation_id: conv.into(),
            conversation_label: None,
            sender: Some("ana@example.com".into()),
            sender_name: None,
            text: text.into(),
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn conversation_is_returned_in_id_order() {
        let mut repo = MockMessageRepository::new();
        repo.expect_find_by_conversation()
            .withf(|c| c == "A")
            .returning(|_| Ok(vec![msg(5, "A", "five"), msg(2, "A", "two"), msg(9, "A", "nine")]));

        let svc = MessageService::new(Arc::new(repo));
        let ids: Vec<_> = svc.conversation("A").await.unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[tokio::test]
    async fn unknown_conversation_is_empty_not_error() {
        let mut repo = MockMessageRepository::new();
        repo.expect_find_by_conversation().returning(|_| Ok(vec![]));

        let svc = MessageService::new(Arc::new(repo));
        assert!(svc.conversation("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn summaries_use_canonical_id_order() {
        let mut repo = MockMessageRepository::new();
        repo.expect_find_all().returning(|| {
            Ok(vec![msg(3, "B", "hey"), msg(2, "A", "yo"), msg(1, "A", "hi")])
        });

        let svc = MessageService::new(Arc::new(repo));
        let out = svc.conversations().await.unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].conversation_id, "A");
        assert_eq!(out[0].last_message, "yo");
        assert_eq!(out[1].conversation_id, "B");
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let mut repo = MockMessageRepository::new();
        repo.expect_find_all().returning(|| Err(DomainError::internal("db down")));

        let svc = MessageService::new(Arc::new(repo));
        assert_eq!(svc.conversations().await.unwrap_err(), DomainError::internal("db down"));
    }
}
