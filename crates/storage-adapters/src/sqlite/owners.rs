use async_trait::async_trait;
use domains::models::{NewPetOwner, PetOwner};
use domains::{DomainError, DomainResult, Entity, PetOwnerRepository, Repository};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{db_err, SqliteStore};

const SELECT: &str =
    "SELECT id, first_name, last_name, email, password_hash, profile_image, cover_image FROM pet_owners";

fn from_row(row: &SqliteRow) -> Result<PetOwner, sqlx::Error> {
    Ok(PetOwner {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        profile_image: row.try_get("profile_image")?,
        cover_image: row.try_get("cover_image")?,
    })
}

#[async_trait]
impl Repository<PetOwner> for SqliteStore {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<PetOwner>> {
        let row = sqlx::query(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(from_row).transpose().map_err(db_err)
    }

    async fn find_all(&self) -> DomainResult<Vec<PetOwner>> {
        let rows = sqlx::query(&format!("{SELECT} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(from_row).collect::<Result<_, _>>().map_err(db_err)
    }

    /// `draft.password` must already be hashed.
    async fn insert(&self, draft: NewPetOwner) -> DomainResult<PetOwner> {
        let id = sqlx::query(
            "INSERT INTO pet_owners (first_name, last_name, email, password_hash, profile_image, cover_image) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.email)
        .bind(&draft.password)
        .bind(&draft.profile_image)
        .bind(&draft.cover_image)
        .execute(&self.pool)
        .await
        .map_err(db_err)?
        .last_insert_rowid();
        Ok(PetOwner::from_draft(id, draft))
    }

    async fn save(&self, owner: PetOwner) -> DomainResult<PetOwner> {
        let done = sqlx::query(
            "UPDATE pet_owners SET first_name = ?, last_name = ?, email = ?, password_hash = ?, profile_image = ?, cover_image = ? WHERE id = ?",
        )
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(&owner.email)
        .bind(&owner.password_hash)
        .bind(&owner.profile_image)
        .bind(&owner.cover_image)
        .bind(owner.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(PetOwner::KIND, owner.id));
        }
        Ok(owner)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<bool> {
        let done = sqlx::query("DELETE FROM pet_owners WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(done.rows_affected() > 0)
    }
}

#[async_trait]
impl PetOwnerRepository for SqliteStore {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<PetOwner>> {
        let row = sqlx::query(&format!("{SELECT} WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(from_row).transpose().map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_store;
    use super::*;

    fn draft(email: &str) -> NewPetOwner {
        NewPetOwner {
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            email: email.into(),
            password: "$argon2id$stub".into(),
            profile_image: None,
            cover_image: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = test_store().await;
        Repository::<PetOwner>::insert(&store, draft("ana@example.com")).await.unwrap();
        let err = Repository::<PetOwner>::insert(&store, draft("ANA@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Conflict("email already registered".into()));
    }

    #[tokio::test]
    async fn test_find_by_email_ignores_case() {
        let store = test_store().await;
        let owner = Repository::<PetOwner>::insert(&store, draft("ana@example.com")).await.unwrap();
        let found = store.find_by_email("Ana@Example.com").await.unwrap().unwrap();
        assert_eq!(found.id, owner.id);
        assert_eq!(found.password_hash, "$argon2id$stub");
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }
}
