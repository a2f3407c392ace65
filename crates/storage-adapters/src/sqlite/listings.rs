use async_trait::async_trait;
use domains::models::{NewPetListing, PetListing};
use domains::{DomainError, DomainResult, Entity, Repository};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{db_err, SqliteStore};

const SELECT: &str =
    "SELECT id, pet_name, breed, age, status, creator_name, creator_id, image_url FROM pet_listings";

fn from_row(row: &SqliteRow) -> Result<PetListing, sqlx::Error> {
    Ok(PetListing {
        id: row.try_get("id")?,
        pet_name: row.try_get("pet_name")?,
        breed: row.try_get("breed")?,
        age: row.try_get("age")?,
        status: row.try_get("status")?,
        creator_name: row.try_get("creator_name")?,
        creator_id: row.try_get("creator_id")?,
        image_url: row.try_get("image_url")?,
    })
}

#[async_trait]
impl Repository<PetListing> for SqliteStore {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<PetListing>> {
        let row = sqlx::query(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(from_row).transpose().map_err(db_err)
    }

    async fn find_all(&self) -> DomainResult<Vec<PetListing>> {
        let rows = sqlx::query(&format!("{SELECT} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(from_row).collect::<Result<_, _>>().map_err(db_err)
    }

    async fn insert(&self, draft: NewPetListing) -> DomainResult<PetListing> {
        let id = sqlx::query(
            "INSERT INTO pet_listings (pet_name, breed, age, status, creator_name, creator_id, image_url) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&draft.pet_name)
        .bind(&draft.breed)
        .bind(draft.age)
        .bind(&draft.status)
        .bind(&draft.creator_name)
        .bind(draft.creator_id)
        .bind(&draft.image_url)
        .execute(&self.pool)
        .await
        .map_err(db_err)?
        .last_insert_rowid();
        Ok(PetListing::from_draft(id, draft))
    }

    async fn save(&self, listing: PetListing) -> DomainResult<PetListing> {
        let done = sqlx::query(
            "UPDATE pet_listings SET pet_name = ?, breed = ?, age = ?, status = ?, creator_name = ?, creator_id = ?, image_url = ? WHERE id = ?",
        )
        .bind(&listing.pet_name)
        .bind(&listing.breed)
        .bind(listing.age)
        .bind(&listing.status)
        .bind(&listing.creator_name)
        .bind(listing.creator_id)
        .bind(&listing.image_url)
        .bind(listing.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(PetListing::KIND, listing.id));
        }
        Ok(listing)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<bool> {
        let done = sqlx::query("DELETE FROM pet_listings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(done.rows_affected() > 0)
    }
}
