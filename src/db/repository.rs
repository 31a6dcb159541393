use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::{Item, NewItem};

use super::schema::SCHEMA;
use super::ItemStore;

pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;
        Self::init(conn).await
    }

    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// The item with the highest sequence id, if any.
    pub async fn latest_item(&self) -> Result<Option<Item>> {
        let item = self
            .conn
            .call(|conn| {
                let item = conn
                    .query_row(
                        "SELECT id, sequence_id, created_at, text, category FROM items ORDER BY sequence_id DESC LIMIT 1",
                        [],
                        item_from_row,
                    )
                    .optional()?;
                Ok(item)
            })
            .await?;
        Ok(item)
    }

    pub async fn insert_item(&self, item: NewItem) -> Result<i64> {
        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO items (sequence_id, created_at, text, category) VALUES (?1, ?2, ?3, ?4)",
                    params![
                        item.sequence_id,
                        item.created_at.to_rfc3339(),
                        item.text,
                        item.category,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;
        Ok(id)
    }

    /// Every stored item, oldest first.
    pub async fn get_all_items(&self) -> Result<Vec<Item>> {
        let items = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, sequence_id, created_at, text, category FROM items ORDER BY sequence_id ASC",
                )?;
                let items = stmt
                    .query_map([], item_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(items)
            })
            .await?;
        Ok(items)
    }
}

#[async_trait]
impl ItemStore for Repository {
    async fn latest_item(&self) -> Result<Option<Item>> {
        Repository::latest_item(self).await
    }

    async fn insert_item(&self, item: NewItem) -> Result<i64> {
        Repository::insert_item(self, item).await
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC3339 first (e.g., "2026-01-11T12:34:56+00:00")
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Try SQLite datetime format (e.g., "2026-01-11 12:34:56")
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

fn item_from_row(row: &Row) -> rusqlite::Result<Item> {
    let raw_created_at: String = row.get(2)?;
    let created_at = parse_datetime(&raw_created_at).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("unrecognised timestamp {raw_created_at:?}").into(),
        )
    })?;

    Ok(Item {
        id: row.get(0)?,
        sequence_id: row.get(1)?,
        created_at,
        text: row.get(3)?,
        category: row.get(4)?,
    })
}
