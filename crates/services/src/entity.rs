//! Generic CRUD over any [`Entity`]: list, get, create, merge-update, delete.

use std::sync::Arc;

use domains::{merge_update, DomainError, DomainResult, Entity, Repository};
use tracing::{debug, info};

pub struct EntityService<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo) }
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> DomainResult<Vec<E>> {
        let all = self.repo.find_all().await?;
        debug!(kind = E::KIND, count = all.len(), "listed records");
        Ok(all)
    }

    pub async fn get(&self, id: i64) -> DomainResult<E> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(E::KIND, id))
    }

    pub async fn create(&self, draft: E::Draft) -> DomainResult<E> {
        debug!(kind = E::KIND, ?draft, "creating record");
        let created = self.repo.insert(draft).await?;
        info!(kind = E::KIND, id = created.id(), "record created");
        Ok(created)
    }

    /// Looks up `id`, merges `patch`, persists. Nothing is written when the
    /// record does not exist.
    pub async fn update(&self, id: i64, patch: E::Patch) -> DomainResult<E> {
        let existing = self.repo.find_by_id(id).await?;
        let merged = merge_update(id, existing, patch)?;
        let saved = self.repo.save(merged).await?;
        info!(kind = E::KIND, id, "record updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.repo.delete_by_id(id).await? {
            return Err(DomainError::not_found(E::KIND, id));
        }
        info!(kind = E::KIND, id, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::models::{NewPet, Pet, PetPatch, NewPost, Post, PostPatch};
    use storage_adapters::memory::MemoryRepository;

    fn new_pet(name: &str) -> NewPet {
        NewPet {
            name: name.into(),
            kind: Some("dog".into()),
            breed: None,
            age: Some(2),
            bio: None,
            documents: None,
            image_url: None,
        }
    }

    fn pets() -> EntityService<Pet> {
        EntityService::new(Arc::new(MemoryRepository::<Pet>::new()))
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let svc = pets();
        let a = svc.create(new_pet("A")).await.unwrap();
        let b = svc.create(new_pet("B")).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(svc.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_merges_and_persists() {
        let svc = pets();
        let pet = svc.create(new_pet("Fido")).await.unwrap();

        let patch = PetPatch { bio: Some("good boy".into()), ..Default::default() };
        let updated = svc.update(pet.id, patch).await.unwrap();
        assert_eq!(updated.id, pet.id);
        assert_eq!(updated.name, "Fido");
        assert_eq!(updated.bio.as_deref(), Some("good boy"));

        assert_eq!(svc.get(pet.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_of_unknown_id_writes_nothing() {
        let svc = pets();
        let err = svc.update(42, PetPatch { name: Some("ghost".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("Pet", 42));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let svc: EntityService<Post> = EntityService::new(Arc::new(MemoryRepository::<Post>::new()));
        let post = svc
            .create(NewPost { content: "hello".into(), image_url: None, creator_name: None })
            .await
            .unwrap();

        svc.delete(post.id).await.unwrap();
        assert!(matches!(svc.get(post.id).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(svc.delete(post.id).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(
            svc.update(post.id, PostPatch::default()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
