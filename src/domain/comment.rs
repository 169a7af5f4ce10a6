//! Comment - the central entity of the moderation engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// One user's vote on a comment. At most one per user per comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub voter_id: u64,
    pub positive: bool,
}

/// Edit record, present once a comment has been edited at least once.
/// Repeated edits re-stamp the same record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEdit {
    pub edited_at: DateTime<Utc>,
}

/// A comment on an article, possibly a reply to another comment.
///
/// Replies form an id-keyed arena: each comment carries the ids of its
/// direct replies and the id of its article, never a live parent pointer.
/// The article owns the flat collection; `depth` is 0 for top-level
/// comments and parent depth + 1 for replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub article_id: u64,
    pub author_id: u64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
    pub edit: Option<CommentEdit>,
    pub votes: Vec<Vote>,
    pub reply_ids: Vec<u64>,
    pub depth: u32,
}

impl Comment {
    /// A fresh top-level comment, id unassigned until inserted.
    pub fn new(
        article_id: u64,
        author_id: u64,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            article_id,
            author_id,
            body: body.into(),
            created_at,
            deleted: false,
            edit: None,
            votes: Vec::new(),
            reply_ids: Vec::new(),
            depth: 0,
        }
    }

    /// A fresh reply inheriting the parent's article and nesting one level
    /// deeper.
    pub fn reply_to(
        parent: &Comment,
        author_id: u64,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut reply = Self::new(parent.article_id, author_id, body, created_at);
        reply.depth = parent.depth + 1;
        reply
    }

    /// This user's vote, if they have one.
    pub fn vote_of(&self, voter_id: u64) -> Option<&Vote> {
        self.votes.iter().find(|v| v.voter_id == voter_id)
    }

    /// Positive votes minus negative votes.
    pub fn score(&self) -> i64 {
        self.votes
            .iter()
            .map(|v| if v.positive { 1 } else { -1 })
            .sum()
    }

    /// Whether the comment has been edited at least once.
    pub fn is_edited(&self) -> bool {
        self.edit.is_some()
    }
}

impl Record for Comment {
    const COLLECTION: &'static str = "comments";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_inherits_article_and_deepens() {
        let now = Utc::now();
        let mut parent = Comment::new(7, 1, "parent", now);
        parent.depth = 2;

        let reply = Comment::reply_to(&parent, 2, "child", now);
        assert_eq!(reply.article_id, 7);
        assert_eq!(reply.depth, 3);
        assert_eq!(reply.id, 0);
    }

    #[test]
    fn score_sums_polarities() {
        let mut comment = Comment::new(1, 1, "scored", Utc::now());
        comment.votes = vec![
            Vote { voter_id: 2, positive: true },
            Vote { voter_id: 3, positive: true },
            Vote { voter_id: 4, positive: false },
        ];
        assert_eq!(comment.score(), 1);
        assert!(comment.vote_of(3).unwrap().positive);
        assert!(comment.vote_of(9).is_none());
    }
}
