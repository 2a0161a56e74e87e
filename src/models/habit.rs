use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Document, Owned, Record};

fn default_icon() -> String {
    "🌱".to_string()
}

fn default_color() -> String {
    "bg-[#7FBC8C]".to_string()
}

/// Habit record with streak tracking. `prev_streak`/`prev_last_completed`
/// shadow the pre-toggle state so a same-day check-in can be undone.
/// Invariant: the shadow fields are populated only between a toggle-on and
/// the matching same-day toggle-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub streak: i64,
    #[serde(rename = "lastCompleted")]
    pub last_completed: Option<NaiveDate>,
    #[serde(rename = "prevStreak")]
    pub prev_streak: Option<i64>,
    #[serde(rename = "prevLastCompleted")]
    pub prev_last_completed: Option<NaiveDate>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(user_id: i64, name: String, icon: Option<String>, color: Option<String>) -> Self {
        Self {
            id: 0,
            user_id,
            name,
            icon: icon.unwrap_or_else(default_icon),
            color: color.unwrap_or_else(default_color),
            streak: 0,
            last_completed: None,
            prev_streak: None,
            prev_last_completed: None,
            created_at: Utc::now(),
        }
    }

    /// Toggle the check-in state for `today`.
    ///
    /// Already checked in today: undo it, restoring the shadowed streak
    /// state. Otherwise: shadow the current state, then extend the streak
    /// when yesterday was completed or restart it at 1.
    ///
    /// Undo depth is exactly one level; after the shadows are consumed a
    /// re-toggle on a later day starts from whatever state is left.
    pub fn checkin(&mut self, today: NaiveDate) {
        if self.last_completed == Some(today) {
            self.streak = self.prev_streak.take().unwrap_or(0);
            self.last_completed = self.prev_last_completed.take();
        } else {
            let continued = today
                .pred_opt()
                .map_or(false, |yesterday| self.last_completed == Some(yesterday));

            self.prev_streak = Some(self.streak);
            self.prev_last_completed = self.last_completed;
            self.streak = if continued { self.streak + 1 } else { 1 };
            self.last_completed = Some(today);
        }
    }
}

impl Record for Habit {
    fn collection(doc: &Document) -> &[Self] {
        &doc.habits
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.habits
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn assign(&mut self, id: i64, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }
}

impl Owned for Habit {
    fn owner(&self) -> i64 {
        self.user_id
    }
}
