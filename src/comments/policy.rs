//! ModerationPolicy - configured time windows and the reply-depth hook.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Time-window and depth configuration for the comment engine.
///
/// Each window is measured from the comment's original creation timestamp;
/// the action stays permitted up to and including the boundary instant and
/// expires once `created_at + window < now`. A zero window therefore denies
/// the action as soon as any time has elapsed - it does not mean unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationPolicy {
    /// How long after creation the author may edit.
    pub edit_window: Duration,
    /// How long after creation the author may delete.
    pub delete_window: Duration,
    /// Nesting limit consulted by `can_have_reply`; None means no limit.
    pub max_reply_depth: Option<u32>,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            edit_window: Duration::from_secs(300),
            delete_window: Duration::from_secs(300),
            max_reply_depth: None,
        }
    }
}

impl ModerationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edit_window(mut self, window: Duration) -> Self {
        self.edit_window = window;
        self
    }

    pub fn with_delete_window(mut self, window: Duration) -> Self {
        self.delete_window = window;
        self
    }

    pub fn with_max_reply_depth(mut self, depth: Option<u32>) -> Self {
        self.max_reply_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let policy = ModerationPolicy::new()
            .with_edit_window(Duration::from_secs(60))
            .with_delete_window(Duration::from_secs(120))
            .with_max_reply_depth(Some(4));

        assert_eq!(policy.edit_window, Duration::from_secs(60));
        assert_eq!(policy.delete_window, Duration::from_secs(120));
        assert_eq!(policy.max_reply_depth, Some(4));
    }

    #[test]
    fn deserializes_with_defaults() {
        let policy: ModerationPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, ModerationPolicy::default());
    }
}
