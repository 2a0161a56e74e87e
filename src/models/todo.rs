use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Document, Owned, Record};

/// Todo item. `completed` is the 0/1 integer flag the frontend expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub task: String,
    #[serde(default)]
    pub completed: i64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(user_id: i64, task: String) -> Self {
        Self {
            id: 0,
            user_id,
            task,
            completed: 0,
            created_at: Utc::now(),
        }
    }
}

impl Record for Todo {
    fn collection(doc: &Document) -> &[Self] {
        &doc.todos
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.todos
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn assign(&mut self, id: i64, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }
}

impl Owned for Todo {
    fn owner(&self) -> i64 {
        self.user_id
    }
}
