//! Clock abstraction so time-window rules are testable without sleeps.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

/// Source of "now" for creation timestamps and window checks.
pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// System clock, the production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic tests. Clones share the same
/// instant, so a test can keep one handle and advance the clock a service
/// is already holding.
#[derive(Clone)]
pub struct ManualTimeProvider {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualTimeProvider {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Jump to a specific instant.
    pub fn set(&self, time: DateTime<Utc>) {
        match self.current.lock() {
            Ok(mut current) => *current = time,
            Err(poisoned) => *poisoned.into_inner() = time,
        }
    }

    /// Move the clock forward (or backward, with a negative duration).
    pub fn advance(&self, duration: chrono::Duration) {
        match self.current.lock() {
            Ok(mut current) => *current += duration,
            Err(poisoned) => *poisoned.into_inner() += duration,
        }
    }
}

impl TimeProvider for ManualTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        match self.current.lock() {
            Ok(current) => *current,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
