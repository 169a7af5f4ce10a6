//! Comment lifecycle and moderation engine.
//!
//! [`CommentService`] implements creation, threaded replies, time-windowed
//! edit and soft-delete, and idempotent voting, each as one
//! resolve-validate-mutate-commit sequence over a fresh unit of work.

mod error;
mod policy;
mod service;
mod text;
mod thread;

pub use error::DomainError;
pub use policy::ModerationPolicy;
pub use service::CommentService;
pub use text::{BasicTextValidator, TextRejected, TextValidator};
pub use thread::ThreadNode;
