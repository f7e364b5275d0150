use std::marker::PhantomData;

use serde_json::Value;

use crate::database::manager::DatabaseError;
use crate::database::models::Document;
use crate::database::store::SharedStore;

/// Typed access to one collection of the document store.
pub struct Repository<T> {
    store: SharedStore,
    _phantom: PhantomData<T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: Document> Repository<T> {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    pub async fn select_all(&self) -> Result<Vec<T>, DatabaseError> {
        let docs = self.store.list(T::COLLECTION).await?;
        decode_all(docs)
    }

    pub async fn select_one(&self, id: &str) -> Result<Option<T>, DatabaseError> {
        match self.store.get(T::COLLECTION, id).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn select_404(&self, id: &str) -> Result<T, DatabaseError> {
        self.select_one(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("{} {} not found", T::COLLECTION, id)))
    }

    /// Exact match on a top-level string field (JSON field name).
    pub async fn find_by(&self, field: &str, value: &str) -> Result<Vec<T>, DatabaseError> {
        let docs = self.store.find_by(T::COLLECTION, field, value).await?;
        decode_all(docs)
    }

    pub async fn insert(&self, record: &T) -> Result<(), DatabaseError> {
        let body = serde_json::to_value(record)?;
        self.store.insert(T::COLLECTION, record.id(), body).await
    }

    pub async fn update(&self, record: &T) -> Result<(), DatabaseError> {
        let body = serde_json::to_value(record)?;
        if self.store.replace(T::COLLECTION, record.id(), body).await? {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(format!("{} {} not found", T::COLLECTION, record.id())))
        }
    }

    /// Returns false when nothing was deleted.
    pub async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        self.store.delete(T::COLLECTION, id).await
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        self.store.count(T::COLLECTION).await
    }
}

fn decode_all<T: Document>(docs: Vec<Value>) -> Result<Vec<T>, DatabaseError> {
    docs.into_iter()
        .map(|doc| serde_json::from_value(doc).map_err(DatabaseError::from))
        .collect()
}
