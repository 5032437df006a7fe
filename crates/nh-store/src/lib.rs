//! NotifyHub Document Store
//!
//! The minimal capability interface the repositories consume: paged query
//! execution, point reads, and the CRUD writes. Two backends implement it -
//! `MongoStore` against a MongoDB collection and `MemoryStore` for tests and
//! dev mode. Both share the opaque continuation cursor codec, so paging
//! semantics are identical across backends.

pub mod cursor;
pub mod error;
pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use serde::Serialize;

use nh_common::{Filter, Sort};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// A query the store executes server-side: an optional filter plus an ordered
/// list of sort keys. The caller owns the sort policy; the store applies it
/// verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Query {
    pub filter: Option<Filter>,
    pub sort: Vec<Sort>,
}

impl Query {
    pub fn new(filter: Option<Filter>, sort: Vec<Sort>) -> Self {
        Self { filter, sort }
    }
}

/// Result of one paged query execution.
#[derive(Debug, Clone)]
pub struct QueryPage<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

/// Store capability interface. Each call is an independent request; the store
/// keeps no state across calls beyond the cursor it hands back.
#[async_trait]
pub trait DocumentStore<T>: Send + Sync {
    /// Executes `query`, resuming from `cursor` when given, and returns at
    /// most `limit` items. `next_cursor` is set only when more matching
    /// entities exist beyond the returned page.
    async fn query_page(
        &self,
        query: &Query,
        cursor: Option<&str>,
        limit: usize,
    ) -> StoreResult<QueryPage<T>>;

    /// Looks up exactly one entity by its identifier.
    async fn point_read(&self, id: &str) -> StoreResult<Option<T>>;

    async fn insert(&self, entity: &T) -> StoreResult<()>;

    /// Replaces the entity with the given id. Returns false when no entity
    /// matched.
    async fn replace(&self, id: &str, entity: &T) -> StoreResult<bool>;

    /// Deletes the entity with the given id. Returns false when no entity
    /// matched.
    async fn delete(&self, id: &str) -> StoreResult<bool>;
}
