mod fetcher;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::RawItem;

pub use fetcher::TimelineFetcher;

/// Upstream timeline that can be asked for everything newer than a cursor.
#[async_trait]
pub trait TimelineSource: Send + Sync {
    /// Items with a sequence id strictly greater than `since_id`, newest first.
    async fn fetch_since(&self, since_id: i64) -> Result<Vec<RawItem>>;
}
