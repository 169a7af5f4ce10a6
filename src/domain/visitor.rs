use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// An anonymous visitor tracked by fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visitor {
    pub id: u64,
    pub fingerprint: String,
    pub last_seen_at: DateTime<Utc>,
}

impl Visitor {
    pub fn new(fingerprint: impl Into<String>, last_seen_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            fingerprint: fingerprint.into(),
            last_seen_at,
        }
    }
}

impl Record for Visitor {
    const COLLECTION: &'static str = "visitors";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}
