use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category stored for items whose trailing text matched no alias.
pub const UNCLASSIFIED: &str = "N/A";

/// A stored, classified timeline item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub sequence_id: i64,
    pub created_at: DateTime<Utc>,
    pub text: String,
    pub category: String,
}

/// An item ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub sequence_id: i64,
    pub created_at: DateTime<Utc>,
    pub text: String,
    pub category: String,
}

/// An item as the feed hands it over, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    pub sequence_id: i64,
    pub created_at: DateTime<Utc>,
    pub text: String,
}

impl RawItem {
    pub fn into_new_item(self, category: String) -> NewItem {
        NewItem {
            sequence_id: self.sequence_id,
            created_at: self.created_at,
            text: self.text,
            category,
        }
    }
}
