use async_trait::async_trait;
use domains::models::{BreederProfile, NewBreederProfile};
use domains::{DomainError, DomainResult, Entity, Repository};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{db_err, SqliteStore};

const SELECT: &str = "SELECT id, breeder_name, location, documents FROM breeder_profiles";

fn from_row(row: &SqliteRow) -> Result<BreederProfile, sqlx::Error> {
    Ok(BreederProfile {
        id: row.try_get("id")?,
        breeder_name: row.try_get("breeder_name")?,
        location: row.try_get("location")?,
        documents: row.try_get("documents")?,
    })
}

#[async_trait]
impl Repository<BreederProfile> for SqliteStore {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<BreederProfile>> {
        let row = sqlx::query(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(from_row).transpose().map_err(db_err)
    }

    async fn find_all(&self) -> DomainResult<Vec<BreederProfile>> {
        let rows = sqlx::query(&format!("{SELECT} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(from_row).collect::<Result<_, _>>().map_err(db_err)
    }

    async fn insert(&self, draft: NewBreederProfile) -> DomainResult<BreederProfile> {
        let id = sqlx::query("INSERT INTO breeder_profiles (breeder_name, location, documents) VALUES (?, ?, ?)")
            .bind(&draft.breeder_name)
            .bind(&draft.location)
            .bind(&draft.documents)
            .execute(&self.pool)
            .await
            .map_err(db_err)?
            .last_insert_rowid();
        Ok(BreederProfile::from_draft(id, draft))
    }

    async fn save(&self, profile: BreederProfile) -> DomainResult<BreederProfile> {
        let done = sqlx::query(
            "UPDATE breeder_profiles SET breeder_name = ?, location = ?, documents = ? WHERE id = ?",
        )
        .bind(&profile.breeder_name)
        .bind(&profile.location)
        .bind(&profile.documents)
        .bind(profile.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(BreederProfile::KIND, profile.id));
        }
        Ok(profile)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<bool> {
        let done = sqlx::query("DELETE FROM breeder_profiles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(done.rows_affected() > 0)
    }
}
