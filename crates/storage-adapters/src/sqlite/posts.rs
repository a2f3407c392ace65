use async_trait::async_trait;
use domains::models::{NewPost, Post};
use domains::{DomainError, DomainResult, Entity, Repository};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{db_err, SqliteStore};

const SELECT: &str = "SELECT id, content, image_url, creator_name FROM posts";

fn from_row(row: &SqliteRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        image_url: row.try_get("image_url")?,
        creator_name: row.try_get("creator_name")?,
    })
}

#[async_trait]
impl Repository<Post> for SqliteStore {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Post>> {
        let row = sqlx::query(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(from_row).transpose().map_err(db_err)
    }

    async fn find_all(&self) -> DomainResult<Vec<Post>> {
        let rows = sqlx::query(&format!("{SELECT} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(from_row).collect::<Result<_, _>>().map_err(db_err)
    }

    async fn insert(&self, draft: NewPost) -> DomainResult<Post> {
        let id = sqlx::query("INSERT INTO posts (content, image_url, creator_name) VALUES (?, ?, ?)")
            .bind(&draft.content)
            .bind(&draft.image_url)
            .bind(&draft.creator_name)
            .execute(&self.pool)
            .await
            .map_err(db_err)?
            .last_insert_rowid();
        Ok(Post::from_draft(id, draft))
    }

    async fn save(&self, post: Post) -> DomainResult<Post> {
        let done = sqlx::query("UPDATE posts SET content = ?, image_url = ?, creator_name = ? WHERE id = ?")
            .bind(&post.content)
            .bind(&post.image_url)
            .bind(&post.creator_name)
            .bind(post.id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(Post::KIND, post.id));
        }
        Ok(post)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<bool> {
        let done = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(done.rows_affected() > 0)
    }
}
