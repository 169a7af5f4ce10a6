use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A registered user, resolvable by id before any mutation references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub joined_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, joined_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            username: username.into(),
            joined_at,
        }
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}
