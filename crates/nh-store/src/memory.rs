//! In-Memory Store
//!
//! Evaluates the same filter/sort descriptors as the MongoDB backend but in
//! process, against entities implementing `Document`. Used by repository
//! tests and by the server's dev mode.

use std::cmp::Ordering;

use async_trait::async_trait;
use parking_lot::RwLock;

use nh_common::{Document, Sort, SortDirection};

use crate::{cursor, DocumentStore, Query, QueryPage, StoreResult};

pub struct MemoryStore<T> {
    entities: RwLock<Vec<T>>,
}

impl<T: Document + Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(Vec::new()),
        }
    }

    pub fn with_entities(entities: Vec<T>) -> Self {
        Self {
            entities: RwLock::new(entities),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }
}

impl<T: Document + Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_by<T: Document>(sort: &[Sort], a: &T, b: &T) -> Ordering {
    for key in sort {
        let ordering = match (a.field(&key.field), b.field(&key.field)) {
            (Some(x), Some(y)) => x.compare(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        let ordering = match key.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl<T> DocumentStore<T> for MemoryStore<T>
where
    T: Document + Clone + Send + Sync,
{
    async fn query_page(
        &self,
        query: &Query,
        cursor: Option<&str>,
        limit: usize,
    ) -> StoreResult<QueryPage<T>> {
        let offset = match cursor {
            Some(token) => cursor::decode(token, query)? as usize,
            None => 0,
        };

        let mut matched: Vec<T> = {
            let entities = self.entities.read();
            entities
                .iter()
                .filter(|entity| {
                    query
                        .filter
                        .as_ref()
                        .map(|f| f.matches(*entity))
                        .unwrap_or(true)
                })
                .cloned()
                .collect()
        };

        if !query.sort.is_empty() {
            matched.sort_by(|a, b| compare_by(&query.sort, a, b));
        }

        let total = matched.len();
        let items: Vec<T> = matched.into_iter().skip(offset).take(limit).collect();
        let consumed = offset + items.len();
        let next_cursor = if consumed < total {
            Some(cursor::encode(consumed as u64, query))
        } else {
            None
        };

        Ok(QueryPage { items, next_cursor })
    }

    async fn point_read(&self, id: &str) -> StoreResult<Option<T>> {
        let entities = self.entities.read();
        Ok(entities
            .iter()
            .find(|entity| entity.document_id() == id)
            .cloned())
    }

    async fn insert(&self, entity: &T) -> StoreResult<()> {
        self.entities.write().push(entity.clone());
        Ok(())
    }

    async fn replace(&self, id: &str, entity: &T) -> StoreResult<bool> {
        let mut entities = self.entities.write();
        match entities.iter_mut().find(|e| e.document_id() == id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut entities = self.entities.write();
        let before = entities.len();
        entities.retain(|e| e.document_id() != id);
        Ok(entities.len() < before)
    }
}
