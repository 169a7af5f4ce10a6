//! Domain entities - comments and the collaborators they reference.

mod article;
mod comment;
mod user;
mod visitor;

pub use article::Article;
pub use comment::{Comment, CommentEdit, Vote};
pub use user::User;
pub use visitor::Visitor;
