use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Document, Owned, Record};

/// Diary entry. Immutable once written; owners may only delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(user_id: i64, content: String, mood: Option<String>) -> Self {
        Self {
            id: 0,
            user_id,
            content,
            mood,
            created_at: Utc::now(),
        }
    }
}

impl Record for Entry {
    fn collection(doc: &Document) -> &[Self] {
        &doc.entries
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.entries
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn assign(&mut self, id: i64, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }
}

impl Owned for Entry {
    fn owner(&self) -> i64 {
        self.user_id
    }
}
