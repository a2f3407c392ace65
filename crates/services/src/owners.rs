//! Owner registration, profile updates and login.
//!
//! Passwords are hashed before they reach the repository, both on create and
//! when a patch carries a new one.

use std::sync::Arc;

use domains::models::{Credentials, LoginProfile, NewPetOwner, PetOwner, PetOwnerPatch};
use domains::{merge_update, CredentialHasher, DomainError, DomainResult, Entity, PetOwnerRepository};
use tracing::{info, warn};

#[derive(Clone)]
pub struct OwnerService {
    repo: Arc<dyn PetOwnerRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl OwnerService {
    pub fn new(repo: Arc<dyn PetOwnerRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repo, hasher }
    }

    pub async fn list(&self) -> DomainResult<Vec<PetOwner>> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: i64) -> DomainResult<PetOwner> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(PetOwner::KIND, id))
    }

    pub async fn register(&self, mut draft: NewPetOwner) -> DomainResult<PetOwner> {
        draft.password = self.hasher.hash(&draft.password).await?;
        let owner = self.repo.insert(draft).await?;
        info!(id = owner.id, "owner registered");
        Ok(owner)
    }

    pub async fn update(&self, id: i64, mut patch: PetOwnerPatch) -> DomainResult<PetOwner> {
        let existing = self.repo.find_by_id(id).await?;
        if existing.is_some() {
            if let Some(plain) = patch.password.take() {
                patch.password = Some(self.hasher.hash(&plain).await?);
            }
        }
        info!(
            id,
            profile_image = ?patch.profile_image,
            cover_image = ?patch.cover_image,
            "updating owner"
        );
        let merged = merge_update(id, existing, patch)?;
        self.repo.save(merged).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.repo.delete_by_id(id).await? {
            return Err(DomainError::not_found(PetOwner::KIND, id));
        }
        info!(id, "owner deleted");
        Ok(())
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, creds: Credentials) -> DomainResult<LoginProfile> {
        let owner = self.repo.find_by_email(&creds.email).await?;
        match owner {
            Some(o) if self.hasher.verify(&creds.password, &o.password_hash).await => {
                info!(id = o.id, "owner logged in");
                Ok(LoginProfile::from(&o))
            }
            _ => {
                warn!(email = %creds.email, "login rejected");
                Err(DomainError::Unauthorized("Invalid credentials".into()))
            }
        }
    }
}
