//! SQLite-backed document store.
//!
//! Every collection shares one `documents` table; bodies are stored as JSON
//! text and filters are evaluated with `json_extract`.

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use super::{Document, DocumentStore, Filter, StoreResult, ID_FIELD};

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the connection pool for `url` and create the schema.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        // Ensure the parent directory exists
        if let Some(parent) = options.get_filename().parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        run_migrations(&pool).await?;

        Ok(Self::new(pool))
    }
}

/// Create tables if they don't exist.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            collection TEXT NOT NULL,
            body TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// `WHERE` clause for a collection plus filter, with its bind values in order.
fn where_clause(collection: &str, filter: &Filter) -> (String, Vec<String>) {
    let mut sql = String::from("WHERE collection = ?");
    let mut binds = vec![collection.to_string()];
    for (field, value) in filter.clauses() {
        sql.push_str(" AND json_extract(body, ?) = ?");
        binds.push(json_path(field));
        binds.push(value.clone());
    }
    (sql, binds)
}

fn json_path(field: &str) -> String {
    format!("$.{}", field)
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<()> {
        let body = serde_json::to_string(&document)?;

        sqlx::query("INSERT INTO documents (collection, body) VALUES (?, ?)")
            .bind(collection)
            .bind(&body)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Document>> {
        let (clause, binds) = where_clause(collection, filter);
        let sql = format!("SELECT id, body FROM documents {} ORDER BY id", clause);

        let mut query = sqlx::query(&sql);
        for value in &binds {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| -> StoreResult<Document> {
                let id: i64 = row.get("id");
                let body: String = row.get("body");
                let mut document: Document = serde_json::from_str(&body)?;
                document.insert(ID_FIELD.to_string(), Value::from(id));
                Ok(document)
            })
            .collect()
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let (clause, binds) = where_clause(collection, filter);
        let sql = format!("DELETE FROM documents {}", clause);

        let mut query = sqlx::query(&sql);
        for value in &binds {
            query = query.bind(value);
        }
        let result = query.execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}
