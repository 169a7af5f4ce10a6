use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// An article comments attach to. Owns its flat comment collection by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub published_at: DateTime<Utc>,
}

impl Article {
    pub fn new(title: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            published_at,
        }
    }
}

impl Record for Article {
    const COLLECTION: &'static str = "articles";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}
