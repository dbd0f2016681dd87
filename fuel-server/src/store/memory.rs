//! In-memory document store.
//!
//! Keeps collections in process memory with the same filter semantics
//! as the MongoDB adapter. Used for testing without a database server.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::RecordId;

use super::error::StoreError;
use super::filter::Filter;
use super::{Document, DocumentStore, Fields};

#[derive(Default)]
struct Inner {
    /// Documents per collection, in insertion order.
    collections: HashMap<String, Vec<Document>>,

    /// When set, every operation fails with this message.
    outage: Option<String>,
}

impl Inner {
    fn check(&self) -> Result<(), StoreError> {
        match &self.outage {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

/// Document store that lives entirely in memory.
#[derive(Clone)]
pub struct InMemoryStore {
    name: String,
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    /// Create an empty store with the given database name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    /// Number of documents in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        let guard = self.inner.read().await;
        guard.collections.get(collection).map_or(0, Vec::len)
    }

    /// Make every subsequent operation fail with `message`.
    pub async fn simulate_outage(&self, message: impl Into<String>) {
        let mut guard = self.inner.write().await;
        guard.outage = Some(message.into());
    }

    /// Clear a simulated outage.
    pub async fn restore(&self) {
        let mut guard = self.inner.write().await;
        guard.outage = None;
    }
}

impl DocumentStore for InMemoryStore {
    fn database_name(&self) -> &str {
        &self.name
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<RecordId, StoreError> {
        let mut guard = self.inner.write().await;
        guard.check()?;

        let id = RecordId::generate();
        guard
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: Some(id),
                fields,
            });

        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.inner.read().await;
        guard.check()?;

        let Some(docs) = guard.collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|doc| filter.matches(doc))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let guard = self.inner.read().await;
        guard.check()?;

        let mut names: Vec<String> = guard.collections.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn fields(value: Value) -> Fields {
        let Value::Object(fields) = value else {
            panic!("test fields must be an object");
        };
        fields
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = InMemoryStore::new("test");
        let id = store
            .insert("gasstation", fields(json!({"name": "Shell"})))
            .await
            .unwrap();

        let docs = store.find("gasstation", &Filter::new(), 10).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, Some(id));
        assert_eq!(docs[0].fields["name"], "Shell");
    }

    #[tokio::test]
    async fn find_keeps_insertion_order_and_limit() {
        let store = InMemoryStore::new("test");
        for n in 0..5 {
            store
                .insert("price", fields(json!({"n": n})))
                .await
                .unwrap();
        }

        let docs = store.find("price", &Filter::new(), 3).await.unwrap();
        let ns: Vec<_> = docs.iter().map(|d| d.fields["n"].clone()).collect();
        assert_eq!(ns, vec![json!(0), json!(1), json!(2)]);

        assert!(store.find("price", &Filter::new(), 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_in_unknown_collection_is_empty() {
        let store = InMemoryStore::new("test");
        let docs = store.find("nothing", &Filter::new(), 10).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn find_by_id() {
        let store = InMemoryStore::new("test");
        let a = store
            .insert("gasstation", fields(json!({"name": "A"})))
            .await
            .unwrap();
        let b = store
            .insert("gasstation", fields(json!({"name": "B"})))
            .await
            .unwrap();

        let found = store.find_by_id("gasstation", b).await.unwrap().unwrap();
        assert_eq!(found.fields["name"], "B");

        let found = store.find_by_id("gasstation", a).await.unwrap().unwrap();
        assert_eq!(found.fields["name"], "A");

        let missing = RecordId::from_bytes([0; 12]);
        assert!(store.find_by_id("gasstation", missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn collection_names_are_sorted() {
        let store = InMemoryStore::new("test");
        store.insert("price", Fields::new()).await.unwrap();
        store.insert("gasstation", Fields::new()).await.unwrap();

        assert_eq!(
            store.collection_names().await.unwrap(),
            vec!["gasstation".to_string(), "price".to_string()]
        );
        assert_eq!(store.database_name(), "test");
    }

    #[tokio::test]
    async fn outage_fails_every_operation() {
        let store = InMemoryStore::new("test");
        store.simulate_outage("connection refused").await;

        let err = store.insert("price", Fields::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert!(store.find("price", &Filter::new(), 1).await.is_err());
        assert!(store.collection_names().await.is_err());
        assert_eq!(store.len("price").await, 0);

        store.restore().await;
        assert!(store.insert("price", Fields::new()).await.is_ok());
        assert_eq!(store.len("price").await, 1);
    }
}
