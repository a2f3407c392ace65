//! In-memory repositories backed by `DashMap`. Ids come from an atomic counter
//! per table, so they are strictly increasing and never reused.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use domains::models::{Message, NewMessage, PetOwner};
use domains::{DomainError, DomainResult, Entity, MessageRepository, PetOwnerRepository, Repository};

pub struct MemoryRepository<E> {
    rows: DashMap<i64, E>,
    next_id: AtomicI64,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self { rows: DashMap::new(), next_id: AtomicI64::new(1) }
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<E>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<E>> {
        let mut all: Vec<E> = self.rows.iter().map(|row| row.value().clone()).collect();
        all.sort_by_key(|e| e.id());
        Ok(all)
    }

    async fn insert(&self, draft: E::Draft) -> DomainResult<E> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entity = E::from_draft(id, draft);
        self.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn save(&self, entity: E) -> DomainResult<E> {
        match self.rows.get_mut(&entity.id()) {
            Some(mut slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(DomainError::not_found(E::KIND, entity.id())),
        }
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<bool> {
        Ok(self.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl PetOwnerRepository for MemoryRepository<PetOwner> {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<PetOwner>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.email.eq_ignore_ascii_case(email))
            .min_by_key(|row| row.id)
            .map(|row| row.value().clone()))
    }
}

pub struct MemoryMessageLog {
    rows: DashMap<i64, Message>,
    next_id: AtomicI64,
}

impl MemoryMessageLog {
    pub fn new() -> Self {
        Self { rows: DashMap::new(), next_id: AtomicI64::new(1) }
    }
}

impl Default for MemoryMessageLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for MemoryMessageLog {
    async fn append(&self, draft: NewMessage) -> DomainResult<Message> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let message = Message::from_draft(id, draft);
        self.rows.insert(id, message.clone());
        Ok(message)
    }

    async fn find_all(&self) -> DomainResult<Vec<Message>> {
        let mut all: Vec<Message> = self.rows.iter().map(|row| row.value().clone()).collect();
        all.sort_by_key(|m| m.id);
        Ok(all)
    }

    async fn find_by_conversation(&self, conversation_id: &str) -> DomainResult<Vec<Message>> {
        let mut found: Vec<Message> = self
            .rows
            .iter()
            .filter(|row| row.conversation_id == conversation_id)
            .map(|row| row.value().clone())
            .collect();
        found.sort_by_key(|m| m.id);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::models::{NewTransaction, Transaction};

    fn new_tx(amount: f64) -> NewTransaction {
        NewTransaction { date: "01-01-2025".into(), amount, status: "pending".into() }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = MemoryRepository::<Transaction>::new();
        let first = repo.insert(new_tx(10.0)).await.unwrap();
        assert!(repo.delete_by_id(first.id).await.unwrap());
        let second = repo.insert(new_tx(20.0)).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn save_of_missing_row_is_not_found() {
        let repo = MemoryRepository::<Transaction>::new();
        let ghost = Transaction { id: 77, date: "x".into(), amount: 1.0, status: "x".into() };
        assert!(matches!(repo.save(ghost).await, Err(DomainError::NotFound { .. })));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_all_is_sorted_by_id() {
        let repo = MemoryRepository::<Transaction>::new();
        for i in 0..20 {
            repo.insert(new_tx(i as f64)).await.unwrap();
        }
        let ids: Vec<_> = repo.find_all().await.unwrap().iter().map(|t| t.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn message_log_filters_by_conversation() {
        let log = MemoryMessageLog::new();
        for (conv, text) in [("A", "hi"), ("B", "hey"), ("A", "yo")] {
            log.append(NewMessage {
                conversation_id: conv.into(),
                conversation_label: None,
                sender: None,
                sender_name: None,
                text: text.into(),
                timestamp: None,
            })
            .await
            .unwrap();
        }
        let a: Vec<_> = log.find_by_conversation("A").await.unwrap().into_iter().map(|m| m.text).collect();
        assert_eq!(a, vec!["hi", "yo"]);
        assert!(log.find_by_conversation("C").await.unwrap().is_empty());
    }
}
