//! Text validation - the collaborator consulted before any text persists.

use thiserror::Error;

/// Why a piece of comment text was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextRejected {
    #[error("comment text is blank")]
    Blank,
    #[error("comment text exceeds {limit} characters")]
    TooLong { limit: usize },
}

/// Validates and normalizes comment text before it is persisted.
pub trait TextValidator: Send + Sync {
    fn validate(&self, text: &str) -> Result<String, TextRejected>;
}

/// Default validator: trims surrounding whitespace, rejects blank and
/// over-length text.
#[derive(Debug, Clone)]
pub struct BasicTextValidator {
    max_chars: usize,
}

impl Default for BasicTextValidator {
    fn default() -> Self {
        Self { max_chars: 10_000 }
    }
}

impl BasicTextValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

impl TextValidator for BasicTextValidator {
    fn validate(&self, text: &str) -> Result<String, TextRejected> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TextRejected::Blank);
        }
        if trimmed.chars().count() > self.max_chars {
            return Err(TextRejected::TooLong {
                limit: self.max_chars,
            });
        }
        Ok(trimmed.to_string())
    }
}
