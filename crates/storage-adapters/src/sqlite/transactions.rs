use async_trait::async_trait;
use domains::models::{NewTransaction, Transaction};
use domains::{DomainError, DomainResult, Entity, Repository};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{db_err, SqliteStore};

const SELECT: &str = "SELECT id, date, amount, status FROM transactions";

fn from_row(row: &SqliteRow) -> Result<Transaction, sqlx::Error> {
    Ok(Transaction {
        id: row.try_get("id")?,
        date: row.try_get("date")?,
        amount: row.try_get("amount")?,
        status: row.try_get("status")?,
    })
}

#[async_trait]
impl Repository<Transaction> for SqliteStore {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Transaction>> {
        let row = sqlx::query(&format!("{SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(from_row).transpose().map_err(db_err)
    }

    async fn find_all(&self) -> DomainResult<Vec<Transaction>> {
        let rows = sqlx::query(&format!("{SELECT} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(from_row).collect::<Result<_, _>>().map_err(db_err)
    }

    async fn insert(&self, draft: NewTransaction) -> DomainResult<Transaction> {
        let id = sqlx::query("INSERT INTO transactions (date, amount, status) VALUES (?, ?, ?)")
            .bind(&draft.date)
            .bind(draft.amount)
            .bind(&draft.status)
            .execute(&self.pool)
            .await
            .map_err(db_err)?
            .last_insert_rowid();
        Ok(Transaction::from_draft(id, draft))
    }

    async fn save(&self, tx: Transaction) -> DomainResult<Transaction> {
        let done = sqlx::query("UPDATE transactions SET date = ?, amount = ?, status = ? WHERE id = ?")
            .bind(&tx.date)
            .bind(tx.amount)
            .bind(&tx.status)
            .bind(tx.id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(Transaction::KIND, tx.id));
        }
        Ok(tx)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<bool> {
        let done = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(done.rows_affected() > 0)
    }
}
