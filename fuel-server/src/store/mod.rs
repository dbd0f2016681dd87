//! Document store access.
//!
//! All reads and writes go through the [`DocumentStore`] trait. The
//! production adapter talks to MongoDB; the in-memory adapter gives the
//! same filter semantics without a server and backs the test suite.
//!
//! Documents are plain JSON objects. The store keeps the record
//! identifier apart from the other fields so callers never see the
//! backend's native id representation.

mod error;
mod filter;
mod memory;
mod mongo;

use std::future::Future;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::RecordId;

pub use error::StoreError;
pub use filter::{Condition, Filter};
pub use memory::InMemoryStore;
pub use mongo::MongoStore;

/// Collection holding [`Station`](crate::domain::Station) records.
pub const STATIONS: &str = "gasstation";

/// Collection holding [`Price`](crate::domain::Price) records.
pub const PRICES: &str = "price";

/// Field name the backend uses for record identifiers.
pub const ID_FIELD: &str = "_id";

/// Document fields other than the identifier.
pub type Fields = Map<String, Value>;

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Identifier assigned by the store, if it is a record id
    pub id: Option<RecordId>,

    /// Remaining fields
    pub fields: Fields,
}

impl Document {
    /// Encode a record as document fields.
    pub fn fields_of<T: Serialize>(record: &T) -> Result<Fields, StoreError> {
        match serde_json::to_value(record) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(other) => Err(StoreError::Backend(format!(
                "record must encode as an object, got {other}"
            ))),
            Err(e) => Err(StoreError::Backend(format!("failed to encode record: {e}"))),
        }
    }
}

/// Access to named collections of documents.
///
/// Implementations are shared across request tasks, so every future
/// they return must be `Send`.
pub trait DocumentStore: Send + Sync + 'static {
    /// Name of the database this store is bound to.
    fn database_name(&self) -> &str;

    /// Insert a document and return its newly assigned identifier.
    fn insert(
        &self,
        collection: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<RecordId, StoreError>> + Send;

    /// Find up to `limit` documents matching `filter`, in natural order.
    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Document>, StoreError>> + Send;

    /// Find the document with the given identifier.
    fn find_by_id(
        &self,
        collection: &str,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>> + Send {
        async move {
            let filter = Filter::new().with_id(id);
            let docs = self.find(collection, &filter, 1).await?;
            Ok(docs.into_iter().next())
        }
    }

    /// Names of the collections in the database.
    fn collection_names(&self) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;
}
