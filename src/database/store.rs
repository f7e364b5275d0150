//! Schemaless document storage.
//!
//! Every entity is stored as a JSON body under `(collection, id)`. Lists come
//! back in insertion order. Two backends implement [`DocumentStore`]:
//! Postgres (one JSONB table) and an in-process map used by tests and demos.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};
use tokio::sync::RwLock;

use super::manager::DatabaseError;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: &str, id: &str, body: Value) -> Result<(), DatabaseError>;

    /// Replace an existing document. Returns false when `id` is absent.
    async fn replace(&self, collection: &str, id: &str, body: Value) -> Result<bool, DatabaseError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, DatabaseError>;

    async fn list(&self, collection: &str) -> Result<Vec<Value>, DatabaseError>;

    /// Documents whose top-level string `field` equals `value` exactly.
    async fn find_by(&self, collection: &str, field: &str, value: &str) -> Result<Vec<Value>, DatabaseError>;

    /// Returns false when `id` is absent.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, DatabaseError>;

    async fn count(&self, collection: &str) -> Result<i64, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

pub type SharedStore = Arc<dyn DocumentStore>;

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, id: &str, body: Value) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id)
            .bind(sqlx::types::Json(body))
            .execute(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DatabaseError::Duplicate(format!("{}/{}", collection, id))
                }
                other => DatabaseError::Sqlx(other),
            })?;
        Ok(())
    }

    async fn replace(&self, collection: &str, id: &str, body: Value) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE documents SET body = $3 WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .bind(sqlx::types::Json(body))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, DatabaseError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let body: sqlx::types::Json<Value> = row.try_get("body")?;
                Ok(Some(body.0))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT body FROM documents WHERE collection = $1 ORDER BY created_at, id",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let body: sqlx::types::Json<Value> = row.try_get("body")?;
                Ok(body.0)
            })
            .collect()
    }

    async fn find_by(&self, collection: &str, field: &str, value: &str) -> Result<Vec<Value>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT body FROM documents
             WHERE collection = $1 AND body ->> $2 = $3
             ORDER BY created_at, id",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let body: sqlx::types::Json<Value> = row.try_get("body")?;
                Ok(body.0)
            })
            .collect()
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: &str) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// In-process store; collections are insertion-ordered vectors.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<(String, Value)>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, id: &str, body: Value) -> Result<(), DatabaseError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|(doc_id, _)| doc_id == id) {
            return Err(DatabaseError::Duplicate(format!("{}/{}", collection, id)));
        }
        docs.push((id.to_string(), body));
        Ok(())
    }

    async fn replace(&self, collection: &str, id: &str, body: Value) -> Result<bool, DatabaseError> {
        let mut collections = self.collections.write().await;
        let slot = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id));

        match slot {
            Some((_, existing)) => {
                *existing = body;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == id))
            .map(|(_, body)| body.clone()))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().map(|(_, body)| body.clone()).collect())
            .unwrap_or_default())
    }

    async fn find_by(&self, collection: &str, field: &str, value: &str) -> Result<Vec<Value>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, body)| body.get(field).and_then(Value::as_str) == Some(value))
                    .map(|(_, body)| body.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|(doc_id, _)| doc_id != id);
        Ok(docs.len() < before)
    }

    async fn count(&self, collection: &str) -> Result<i64, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, |docs| docs.len() as i64))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn memory_store_crud() {
        let store = MemoryDocumentStore::new();
        store.insert("users", "a", json!({"id": "a", "email": "a@x.tn"})).await.unwrap();
        store.insert("users", "b", json!({"id": "b", "email": "b@x.tn"})).await.unwrap();

        assert_eq!(store.count("users").await.unwrap(), 2);
        assert_eq!(store.get("users", "a").await.unwrap().unwrap()["email"], "a@x.tn");
        assert!(store.get("admins", "a").await.unwrap().is_none());

        assert!(store.replace("users", "a", json!({"id": "a", "email": "new@x.tn"})).await.unwrap());
        assert!(!store.replace("users", "zz", json!({})).await.unwrap());

        let found = store.find_by("users", "email", "new@x.tn").await.unwrap();
        assert_eq!(found.len(), 1);

        assert!(store.delete("users", "a").await.unwrap());
        assert!(!store.delete("users", "a").await.unwrap());
        let ids: Vec<_> = store.list("users").await.unwrap().iter().map(|d| d["id"].clone()).collect();
        assert_eq!(ids, vec![json!("b")]);
    }

    #[tokio::test]
    async fn memory_store_rejects_duplicate_ids() {
        let store = MemoryDocumentStore::new();
        store.insert("news", "n1", json!({"id": "n1"})).await.unwrap();
        let err = store.insert("news", "n1", json!({"id": "n1"})).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Duplicate(ref key) if key == "news/n1"));
        assert_eq!(store.count("news").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn memory_store_keeps_insertion_order() {
        let store = MemoryDocumentStore::new();
        for id in ["c", "a", "b"] {
            store.insert("departments", id, json!({"id": id, "location": "Mateur"})).await.unwrap();
        }
        let ids: Vec<_> = store
            .find_by("departments", "location", "Mateur")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }
}
