//! Remote fetcher trait.

use async_trait::async_trait;

use crate::Result;
use crate::list::{ListPage, PageQuery};
use crate::types::EntityId;

use super::Entity;

/// Read access to one REST collection.
///
/// Each call issues exactly one request. Nothing is retried.
#[async_trait]
pub trait Fetcher<E: Entity>: Send + Sync {
    /// Fetch one page of the collection.
    async fn fetch_page(&self, query: &PageQuery) -> Result<ListPage<E>>;

    /// Fetch one entity by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if no such
    /// entity exists.
    async fn fetch_one(&self, id: &EntityId) -> Result<E>;
}
