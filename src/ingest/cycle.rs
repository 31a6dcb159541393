use crate::classify::Classifier;
use crate::db::ItemStore;
use crate::error::CycleError;
use crate::feed::TimelineSource;
use crate::models::RawItem;

/// Cursor used while the store is still empty.
pub const SENTINEL_CURSOR: i64 = 1;

/// What a completed cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleReport {
    pub cursor: i64,
    pub fetched: usize,
    pub persisted: usize,
}

/// Highest sequence id already stored, or [`SENTINEL_CURSOR`].
pub async fn resolve_cursor<S>(store: &S) -> Result<i64, CycleError>
where
    S: ItemStore + ?Sized,
{
    let latest = store.latest_item().await.map_err(CycleError::CursorRead)?;
    Ok(latest.map_or(SENTINEL_CURSOR, |item| item.sequence_id))
}

/// Turn the feed's newest-first page into oldest-first insertion order.
pub fn normalize(mut raw: Vec<RawItem>) -> Vec<RawItem> {
    raw.reverse();
    raw
}

/// One resolve → fetch → normalize → classify → persist pass.
///
/// Items are inserted in ascending sequence order and the first failed insert
/// stops the batch. Whatever was stored before the failure stays stored; the
/// rest is fetched again next cycle because the cursor is always recomputed
/// from the store.
pub async fn run_cycle<F, S>(
    source: &F,
    store: &S,
    classifier: &Classifier,
) -> Result<CycleReport, CycleError>
where
    F: TimelineSource + ?Sized,
    S: ItemStore + ?Sized,
{
    let cursor = resolve_cursor(store).await?;

    let raw = source.fetch_since(cursor).await.map_err(CycleError::Fetch)?;
    let fetched = raw.len();
    tracing::debug!("Fetched {} items after cursor {}", fetched, cursor);

    let mut persisted = 0;
    for item in normalize(raw) {
        let sequence_id = item.sequence_id;
        let category = classifier.category_for(&item.text);
        tracing::trace!("Item {} classified as {}", sequence_id, category);

        store
            .insert_item(item.into_new_item(category))
            .await
            .map_err(|source| CycleError::Persist {
                sequence_id,
                source,
            })?;
        persisted += 1;
    }

    Ok(CycleReport {
        cursor,
        fetched,
        persisted,
    })
}
