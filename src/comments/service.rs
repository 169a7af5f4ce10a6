//! CommentService - the lifecycle and moderation engine.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

#[cfg(feature = "emitter")]
use std::sync::Mutex;

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;

use crate::clock::{SystemTimeProvider, TimeProvider};
use crate::domain::{Comment, User, Vote};
use crate::repository::UnitOfWork;
use crate::store::RecordStore;

use super::thread::{assemble, ThreadNode};
use super::{BasicTextValidator, DomainError, ModerationPolicy, TextValidator};

/// The comment lifecycle engine.
///
/// Every public operation opens its own unit of work and performs at most
/// one resolve-validate-mutate-commit sequence, blocking until the store
/// round-trip completes. Failed and no-op operations never commit. With the
/// `emitter` feature, each committed mutation publishes a named event with
/// a JSON payload to in-process subscribers.
pub struct CommentService {
    store: Arc<dyn RecordStore>,
    policy: ModerationPolicy,
    validator: Arc<dyn TextValidator>,
    clock: Arc<dyn TimeProvider>,
    #[cfg(feature = "emitter")]
    emitter: Mutex<EventEmitter>,
}

impl CommentService {
    /// Create a service over the given store with the default policy,
    /// validator, and system clock.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            policy: ModerationPolicy::default(),
            validator: Arc::new(BasicTextValidator::default()),
            clock: Arc::new(SystemTimeProvider),
            #[cfg(feature = "emitter")]
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    pub fn with_policy(mut self, policy: ModerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_validator(mut self, validator: impl TextValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn TimeProvider>) -> Self {
        self.clock = clock;
        self
    }

    pub fn policy(&self) -> &ModerationPolicy {
        &self.policy
    }

    /// Subscribe to a named event ("CommentPosted", "VoteCast", ...). The
    /// callback receives the event's JSON payload.
    #[cfg(feature = "emitter")]
    pub fn on_event<F>(&self, event: &str, callback: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.on(event, callback);
        }
    }

    /// Post a new top-level comment on an article.
    pub fn create(
        &self,
        author_id: u64,
        article_id: u64,
        body: &str,
    ) -> Result<Comment, DomainError> {
        require_id(author_id, "user")?;
        require_id(article_id, "article")?;

        let uow = self.unit_of_work();
        self.resolve_user(&uow, author_id)?;
        uow.articles()
            .get_by_id(article_id)?
            .ok_or(DomainError::NotFound {
                entity: "article",
                id: article_id,
            })?;

        let body = self.validate_text(body)?;
        let mut comment = Comment::new(article_id, author_id, body, self.clock.now());
        uow.comments().insert(&mut comment)?;
        uow.commit()?;

        debug!(comment_id = comment.id, article_id, author_id, "comment posted");
        self.publish("CommentPosted", comment_payload(&comment));
        Ok(comment)
    }

    /// Reply to an existing comment. The reply inherits the parent's
    /// article; the parent's reply list and the new comment land in one
    /// commit.
    pub fn reply(
        &self,
        parent_id: u64,
        author_id: u64,
        body: &str,
    ) -> Result<Comment, DomainError> {
        require_id(parent_id, "comment")?;
        require_id(author_id, "user")?;

        let uow = self.unit_of_work();
        let mut parent = self.resolve_comment(&uow, parent_id)?;
        self.resolve_user(&uow, author_id)?;

        let body = self.validate_text(body)?;
        let mut reply = Comment::reply_to(&parent, author_id, body, self.clock.now());
        uow.comments().insert(&mut reply)?;
        parent.reply_ids.push(reply.id);
        uow.comments().update(&parent)?;
        uow.commit()?;

        debug!(
            comment_id = reply.id,
            parent_id,
            article_id = reply.article_id,
            "reply posted"
        );
        self.publish("CommentReplied", comment_payload(&reply));
        Ok(reply)
    }

    /// Replace a comment's text. Only the author, only while the
    /// creation-anchored edit window is open; re-stamps the edit record.
    pub fn edit(
        &self,
        comment_id: u64,
        author_id: u64,
        body: &str,
    ) -> Result<Comment, DomainError> {
        require_id(comment_id, "comment")?;
        require_id(author_id, "user")?;

        let uow = self.unit_of_work();
        let mut comment = self.resolve_comment(&uow, comment_id)?;
        if comment.deleted {
            return Err(DomainError::Forbidden("comment is deleted"));
        }
        if comment.author_id != author_id {
            return Err(DomainError::Forbidden("requester is not the author"));
        }
        if self.window_elapsed(comment.created_at, self.policy.edit_window) {
            return Err(DomainError::Expired {
                action: "edit",
                comment_id,
            });
        }

        let body = self.validate_text(body)?;
        comment.body = body;
        comment.edit = Some(crate::domain::CommentEdit {
            edited_at: self.clock.now(),
        });
        uow.comments().update(&comment)?;
        uow.commit()?;

        debug!(comment_id, author_id, "comment edited");
        self.publish("CommentEdited", comment_payload(&comment));
        Ok(comment)
    }

    /// Soft-delete a comment. Text is retained, replies stay visible under
    /// the tombstoned parent; deletion never cascades.
    pub fn delete(&self, comment_id: u64, author_id: u64) -> Result<(), DomainError> {
        require_id(comment_id, "comment")?;
        require_id(author_id, "user")?;

        let uow = self.unit_of_work();
        let mut comment = self.resolve_comment(&uow, comment_id)?;
        if comment.deleted {
            return Err(DomainError::Forbidden("comment is already deleted"));
        }
        if comment.author_id != author_id {
            return Err(DomainError::Forbidden("requester is not the author"));
        }
        if self.window_elapsed(comment.created_at, self.policy.delete_window) {
            return Err(DomainError::Expired {
                action: "delete",
                comment_id,
            });
        }

        comment.deleted = true;
        uow.comments().update(&comment)?;
        uow.commit()?;

        debug!(comment_id, author_id, "comment soft-deleted");
        self.publish("CommentDeleted", comment_payload(&comment));
        Ok(())
    }

    /// Whether the user may edit the comment right now. Pure predicate for
    /// presentation layers; performs no mutation.
    pub fn can_edit(&self, user_id: u64, comment: &Comment) -> bool {
        !comment.deleted
            && comment.author_id == user_id
            && !self.window_elapsed(comment.created_at, self.policy.edit_window)
    }

    /// Whether the user may delete the comment right now.
    pub fn can_delete(&self, user_id: u64, comment: &Comment) -> bool {
        !comment.deleted
            && comment.author_id == user_id
            && !self.window_elapsed(comment.created_at, self.policy.delete_window)
    }

    /// Whether the comment accepts replies under the configured policy.
    /// A policy hook for hosts; `reply` itself does not consult it.
    pub fn can_have_reply(&self, comment: &Comment) -> bool {
        !comment.deleted
            && self
                .policy
                .max_reply_depth
                .map_or(true, |max| comment.depth < max)
    }

    /// Cast or adjust a vote. Re-voting with the same polarity is an
    /// idempotent no-op (no commit); the opposite polarity flips the
    /// existing vote in place. One vote per user per comment.
    pub fn add_vote(
        &self,
        comment_id: u64,
        voter_id: u64,
        positive: bool,
    ) -> Result<(), DomainError> {
        require_id(comment_id, "comment")?;
        require_id(voter_id, "user")?;

        let uow = self.unit_of_work();
        let mut comment = self.resolve_comment(&uow, comment_id)?;
        self.resolve_user(&uow, voter_id)?;
        if comment.deleted {
            return Err(DomainError::Forbidden("comment is deleted"));
        }

        match comment.votes.iter_mut().find(|v| v.voter_id == voter_id) {
            Some(vote) if vote.positive == positive => return Ok(()),
            Some(vote) => vote.positive = positive,
            None => comment.votes.push(Vote { voter_id, positive }),
        }

        uow.comments().update(&comment)?;
        uow.commit()?;

        debug!(comment_id, voter_id, positive, "vote cast");
        self.publish("VoteCast", vote_payload(comment_id, voter_id, Some(positive)));
        Ok(())
    }

    /// Remove the user's vote from a comment.
    pub fn delete_vote(&self, comment_id: u64, voter_id: u64) -> Result<(), DomainError> {
        require_id(comment_id, "comment")?;
        require_id(voter_id, "user")?;

        let uow = self.unit_of_work();
        let mut comment = self.resolve_comment(&uow, comment_id)?;

        let position = comment
            .votes
            .iter()
            .position(|v| v.voter_id == voter_id)
            .ok_or(DomainError::VoteNotFound {
                comment_id,
                voter_id,
            })?;
        comment.votes.remove(position);

        uow.comments().update(&comment)?;
        uow.commit()?;

        debug!(comment_id, voter_id, "vote retracted");
        self.publish("VoteRetracted", vote_payload(comment_id, voter_id, None));
        Ok(())
    }

    /// Read-only: the article's full comment thread, roots ordered by
    /// creation time (id as tie-break), replies in reply-list order.
    pub fn article_thread(&self, article_id: u64) -> Result<Vec<ThreadNode>, DomainError> {
        require_id(article_id, "article")?;

        let uow = self.unit_of_work();
        uow.articles()
            .get_by_id(article_id)?
            .ok_or(DomainError::NotFound {
                entity: "article",
                id: article_id,
            })?;

        let mut spec = crate::query::QuerySpec::new();
        spec.add_filter(crate::query::Predicate::new(move |c: &Comment| {
            c.article_id == article_id
        }));
        spec.add_sort_criterion(crate::query::SortCriterion::ascending(|c: &Comment| {
            c.created_at
        }));
        spec.add_sort_criterion(crate::query::SortCriterion::ascending(|c: &Comment| c.id));
        spec.include_property(crate::query::Include::new("replies"));
        spec.include_property(crate::query::Include::new("votes"));

        let comments = uow.comments().query(spec)?;
        Ok(assemble(comments))
    }

    fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::new(Arc::clone(&self.store))
    }

    fn resolve_comment(&self, uow: &UnitOfWork, id: u64) -> Result<Comment, DomainError> {
        uow.comments()
            .get_by_id(id)?
            .ok_or(DomainError::NotFound {
                entity: "comment",
                id,
            })
    }

    fn resolve_user(&self, uow: &UnitOfWork, id: u64) -> Result<User, DomainError> {
        uow.users()
            .get_by_id(id)?
            .ok_or(DomainError::NotFound { entity: "user", id })
    }

    fn validate_text(&self, body: &str) -> Result<String, DomainError> {
        self.validator
            .validate(body)
            .map_err(|rejected| DomainError::InvalidArgument(rejected.to_string()))
    }

    /// Expired once `created_at + window < now`; the boundary instant is
    /// still permitted.
    fn window_elapsed(&self, created_at: DateTime<Utc>, window: Duration) -> bool {
        let now = self.clock.now();
        match chrono::Duration::from_std(window) {
            Ok(window) => match created_at.checked_add_signed(window) {
                Some(deadline) => deadline < now,
                None => false,
            },
            // A window too large for the calendar never elapses.
            Err(_) => false,
        }
    }

    #[cfg(feature = "emitter")]
    fn publish(&self, event: &str, payload: String) {
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.emit(event, payload);
        }
    }

    #[cfg(not(feature = "emitter"))]
    fn publish(&self, _event: &str, _payload: String) {}
}

fn require_id(id: u64, entity: &'static str) -> Result<(), DomainError> {
    if id == 0 {
        return Err(DomainError::InvalidArgument(format!(
            "{} id must be non-zero",
            entity
        )));
    }
    Ok(())
}

fn comment_payload(comment: &Comment) -> String {
    serde_json::to_string(comment).unwrap_or_default()
}

fn vote_payload(comment_id: u64, voter_id: u64, positive: Option<bool>) -> String {
    serde_json::json!({
        "comment_id": comment_id,
        "voter_id": voter_id,
        "positive": positive,
    })
    .to_string()
}
