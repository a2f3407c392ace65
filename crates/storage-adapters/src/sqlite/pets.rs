use async_trait::async_trait;
use domains::models::{NewPet, Pet};
use domains::{DomainError, DomainResult, Entity, Repository};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{db_err, SqliteStore};

const SELECT: &str = "SELECT id, name, kind, breed, age, bio, documents, image_url FROM pets";

fn from_row(row: &SqliteRow) -> Result<Pet, sqlx::Error> {
    Ok(Pet {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        kind: row.try_get("kind")?,
        breed: row.try_get("breed")?,
        age: row.try_get("age")?,
        bio: row.try_get("bio")?,
        documents: row.try_get("documents")?,
        image_url: row.try_get("image_url")?,
    })
}

#[async_trait]
impl Repository<Pet> for SqliteStore {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Pet>> {
        let row = sqlx::query(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(from_row).transpose().map_err(db_err)
    }

    async fn find_all(&self) -> DomainResult<Vec<Pet>> {
        let rows = sqlx::query(&format!("{SELECT} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(from_row).collect::<Result<_, _>>().map_err(db_err)
    }

    async fn insert(&self, draft: NewPet) -> DomainResult<Pet> {
        let id = sqlx::query(
            "INSERT INTO pets (name, kind, breed, age, bio, documents, image_url) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&draft.name)
        .bind(&draft.kind)
        .bind(&draft.breed)
        .bind(draft.age)
        .bind(&draft.bio)
        .bind(&draft.documents)
        .bind(&draft.image_url)
        .execute(&self.pool)
        .await
        .map_err(db_err)?
        .last_insert_rowid();
        Ok(Pet::from_draft(id, draft))
    }

    async fn save(&self, pet: Pet) -> DomainResult<Pet> {
        let done = sqlx::query(
            "UPDATE pets SET name = ?, kind = ?, breed = ?, age = ?, bio = ?, documents = ?, image_url = ? WHERE id = ?",
        )
        .bind(&pet.name)
        .bind(&pet.kind)
        .bind(&pet.breed)
        .bind(pet.age)
        .bind(&pet.bio)
        .bind(&pet.documents)
        .bind(&pet.image_url)
        .bind(pet.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(Pet::KIND, pet.id));
        }
        Ok(pet)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<bool> {
        let done = sqlx::query("DELETE FROM pets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(done.rows_affected() > 0)
    }
}
