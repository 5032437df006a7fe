//! MongoDB Store
//!
//! Translates the filter/sort descriptors into BSON and delegates execution
//! to the collection. MongoDB's `find` has no server-side continuation token,
//! so the store fetches one document beyond the page to learn whether more
//! results exist and encodes the resume offset into the shared cursor token.

use bson::{doc, Bson, Document as BsonDocument};
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use async_trait::async_trait;
use nh_common::{Comparison, FieldValue, Filter, Sort, SortDirection};

use crate::{cursor, DocumentStore, Query, QueryPage, StoreResult};

pub struct MongoStore<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T> MongoStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            collection: db.collection(collection),
        }
    }
}

fn bson_value(value: &FieldValue) -> Bson {
    match value {
        FieldValue::Str(s) => Bson::String(s.clone()),
        FieldValue::Int(i) => Bson::Int64(*i),
        FieldValue::Bool(b) => Bson::Boolean(*b),
        FieldValue::Timestamp(ts) => Bson::DateTime(bson::DateTime::from_chrono(*ts)),
    }
}

fn comparison_operator(op: Comparison) -> &'static str {
    match op {
        Comparison::Eq => "$eq",
        Comparison::Ne => "$ne",
        Comparison::Gt => "$gt",
        Comparison::Gte => "$gte",
        Comparison::Lt => "$lt",
        Comparison::Lte => "$lte",
    }
}

fn filter_document(filter: &Filter) -> BsonDocument {
    match filter {
        Filter::Field { field, op, value } => {
            let value = bson_value(value);
            let mut document = BsonDocument::new();
            match op {
                Comparison::Eq => {
                    document.insert(field.as_str(), value);
                }
                other => {
                    document.insert(field.as_str(), doc! { comparison_operator(*other): value });
                }
            }
            document
        }
        // Absent fields are never serialized, so existence is the test.
        Filter::Absent(field) => {
            let mut document = BsonDocument::new();
            document.insert(field.as_str(), doc! { "$exists": false });
            document
        }
        Filter::And(filters) => {
            let clauses: Vec<Bson> = filters
                .iter()
                .map(|f| Bson::Document(filter_document(f)))
                .collect();
            doc! { "$and": clauses }
        }
        Filter::Or(filters) => {
            let clauses: Vec<Bson> = filters
                .iter()
                .map(|f| Bson::Document(filter_document(f)))
                .collect();
            doc! { "$or": clauses }
        }
    }
}

fn sort_document(sort: &[Sort]) -> BsonDocument {
    let mut document = BsonDocument::new();
    for key in sort {
        let direction = match key.direction {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        };
        document.insert(key.field.as_str(), direction);
    }
    document
}

#[async_trait]
impl<T> DocumentStore<T> for MongoStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + Unpin,
{
    async fn query_page(
        &self,
        query: &Query,
        cursor: Option<&str>,
        limit: usize,
    ) -> StoreResult<QueryPage<T>> {
        let offset = match cursor {
            Some(token) => cursor::decode(token, query)?,
            None => 0,
        };

        let filter = query
            .filter
            .as_ref()
            .map(filter_document)
            .unwrap_or_default();

        let mut options = FindOptions::builder()
            .skip(offset)
            // One extra document tells us whether a next page exists.
            .limit(limit as i64 + 1)
            .build();
        if !query.sort.is_empty() {
            options.sort = Some(sort_document(&query.sort));
        }

        debug!(collection = self.collection.name(), offset, limit, "executing paged find");
        let stream = self.collection.find(filter).with_options(options).await?;
        let mut items: Vec<T> = stream.try_collect().await?;

        let next_cursor = if items.len() > limit {
            items.truncate(limit);
            Some(cursor::encode(offset + limit as u64, query))
        } else {
            None
        };

        Ok(QueryPage { items, next_cursor })
    }

    async fn point_read(&self, id: &str) -> StoreResult<Option<T>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, entity: &T) -> StoreResult<()> {
        self.collection.insert_one(entity).await?;
        Ok(())
    }

    async fn replace(&self, id: &str, entity: &T) -> StoreResult<bool> {
        let result = self
            .collection
            .replace_one(doc! { "_id": id }, entity)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_translates_to_plain_match() {
        let document = filter_document(&Filter::eq("readStatus", "NEW"));
        assert_eq!(document, doc! { "readStatus": "NEW" });
    }

    #[test]
    fn comparisons_translate_to_operators() {
        let document = filter_document(&Filter::gt("priority", 1));
        assert_eq!(document, doc! { "priority": { "$gt": 1_i64 } });

        let document = filter_document(&Filter::lte("priority", 2));
        assert_eq!(document, doc! { "priority": { "$lte": 2_i64 } });
    }

    #[test]
    fn absence_translates_to_exists_false() {
        let document = filter_document(&Filter::absent("expiresOnUtcDate"));
        assert_eq!(
            document,
            doc! { "expiresOnUtcDate": { "$exists": false } }
        );
    }

    #[test]
    fn combinators_translate_to_and_or() {
        let document = filter_document(&Filter::and(vec![
            Filter::eq("readStatus", "NEW"),
            Filter::ne("application", "ops"),
        ]));
        assert_eq!(
            document,
            doc! { "$and": [
                { "readStatus": "NEW" },
                { "application": { "$ne": "ops" } },
            ]}
        );
    }

    #[test]
    fn sort_keys_translate_in_order() {
        let document = sort_document(&[
            Sort::ascending("priority"),
            Sort::descending("publishOnUtcDate"),
        ]);
        assert_eq!(document, doc! { "priority": 1, "publishOnUtcDate": -1 });
    }
}
