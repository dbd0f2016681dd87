//! MongoDB document store.
//!
//! Wraps a single driver client bound to one database. The client is
//! created once at startup and shared by every request.

use bson::oid::ObjectId;
use bson::{Bson, Document as BsonDocument, doc};
use futures::TryStreamExt;
use mongodb::{Client, Database};
use tracing::debug;

use crate::domain::RecordId;

use super::error::StoreError;
use super::filter::{Condition, Filter};
use super::{Document, DocumentStore, Fields, ID_FIELD};

/// Document store backed by a MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to the server at `url` and bind to database `name`.
    ///
    /// Fails if the connection string is invalid or the server does not
    /// answer a ping.
    pub async fn connect(url: &str, name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await?;
        let database = client.database(name);
        database.run_command(doc! { "ping": 1 }).await?;

        Ok(Self { database })
    }

    fn collection(&self, name: &str) -> mongodb::Collection<BsonDocument> {
        self.database.collection(name)
    }
}

impl DocumentStore for MongoStore {
    fn database_name(&self) -> &str {
        self.database.name()
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<RecordId, StoreError> {
        let doc = bson::to_document(&fields)?;
        let result = self.collection(collection).insert_one(doc).await?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(RecordId::from(oid)),
            other => Err(StoreError::UnexpectedId(other.to_string())),
        }
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let query = to_query(filter)?;
        debug!(collection, %query, limit, "find");

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let cursor = self.collection(collection).find(query).limit(limit).await?;
        let docs: Vec<BsonDocument> = cursor.try_collect().await?;

        Ok(docs.into_iter().map(from_bson).collect())
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.database.list_collection_names().await?)
    }
}

impl From<ObjectId> for RecordId {
    fn from(oid: ObjectId) -> Self {
        RecordId::from_bytes(oid.bytes())
    }
}

impl From<RecordId> for ObjectId {
    fn from(id: RecordId) -> Self {
        ObjectId::from_bytes(id.bytes())
    }
}

/// Translate a filter into a MongoDB query document.
fn to_query(filter: &Filter) -> Result<BsonDocument, StoreError> {
    let mut query = BsonDocument::new();

    if let Some(id) = filter.id() {
        query.insert(ID_FIELD, ObjectId::from(id));
    }

    for (field, condition) in filter.clauses() {
        let value = match condition {
            Condition::Equals(value) => bson::to_bson(value)?,
            Condition::EqualsIgnoreCase(text) => Bson::Document(doc! {
                "$regex": format!("^{}$", regex::escape(text)),
                "$options": "i",
            }),
            Condition::Contains(value) => Bson::Document(doc! {
                "$in": [bson::to_bson(value)?],
            }),
        };
        query.insert(field.as_str(), value);
    }

    Ok(query)
}

/// Split a stored document into its record id and remaining fields.
///
/// An `_id` that is not an ObjectId is left among the fields.
fn from_bson(mut doc: BsonDocument) -> Document {
    let id = match doc.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => Some(RecordId::from(oid)),
        Some(other) => {
            doc.insert(ID_FIELD, other);
            None
        }
        None => None,
    };

    let fields = doc
        .into_iter()
        .map(|(key, value)| (key, value.into_relaxed_extjson()))
        .collect();

    Document { id, fields }
}
