mod repository;
mod schema;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Item, NewItem};

pub use repository::Repository;

/// Durable home of ingested items.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// The stored item with the largest sequence id, or `None` when empty.
    async fn latest_item(&self) -> Result<Option<Item>>;

    /// Insert one item, returning its internal row id.
    async fn insert_item(&self, item: NewItem) -> Result<i64>;
}
