use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Document, Record};

fn default_avatar() -> String {
    "😎".to_string()
}

/// Account record as persisted. The password field holds the bcrypt hash;
/// client responses go through [`User::to_public`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: 0,
            username,
            password: password_hash,
            bio: String::new(),
            tags: Vec::new(),
            avatar: default_avatar(),
            created_at: Utc::now(),
        }
    }

    /// Client-facing projection; never exposes the password hash.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            bio: self.bio.clone(),
            tags: self.tags.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub bio: String,
    pub tags: Vec<String>,
    pub avatar: String,
}

impl Record for User {
    fn collection(doc: &Document) -> &[Self] {
        &doc.users
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.users
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn assign(&mut self, id: i64, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }
}
