//! Error taxonomy for comment operations.

use thiserror::Error;

use crate::store::StoreError;

/// Failure kinds raised by the comment engine. Every validation and
/// business-rule failure is returned synchronously to the caller; nothing
/// is swallowed or logged-and-continued at this layer.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required argument was unusable: blank or over-length text, or a
    /// zero identifier where one is required.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced user, article, comment, or vote does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// The requester is not the resource's author, or the resource is in a
    /// terminal state for the attempted operation.
    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    /// The creation-anchored time window for the action has elapsed.
    #[error("{action} window for comment {comment_id} has expired")]
    Expired {
        action: &'static str,
        comment_id: u64,
    },

    /// A vote removal targeted a user with no vote on that comment.
    #[error("no vote by user {voter_id} on comment {comment_id}")]
    VoteNotFound { comment_id: u64, voter_id: u64 },

    /// Reserved for hosts that enforce a nesting limit through
    /// [`can_have_reply`](super::CommentService::can_have_reply); `reply`
    /// itself does not raise it.
    #[error("reply depth exceeds maximum of {max}")]
    ReplyDepthExceeded { max: u32 },

    /// The underlying store rejected a commit.
    #[error(transparent)]
    Store(#[from] StoreError),
}
