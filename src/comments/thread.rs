//! Thread assembly - the arena of an article's comments as a tree.

use std::collections::HashMap;

use crate::domain::Comment;

/// One node of an assembled comment thread: the comment, its vote score,
/// and its replies in the parent's reply-list order.
#[derive(Debug, Clone)]
pub struct ThreadNode {
    pub comment: Comment,
    pub score: i64,
    pub replies: Vec<ThreadNode>,
}

/// Assemble an article's flat, already-ordered comment list into a forest
/// of top-level nodes. Input order decides root order; each node's replies
/// follow its stored reply-id list.
pub(crate) fn assemble(comments: Vec<Comment>) -> Vec<ThreadNode> {
    let root_ids: Vec<u64> = comments
        .iter()
        .filter(|c| c.depth == 0)
        .map(|c| c.id)
        .collect();

    let mut arena: HashMap<u64, Comment> = comments.into_iter().map(|c| (c.id, c)).collect();

    root_ids
        .into_iter()
        .filter_map(|id| take_node(id, &mut arena))
        .collect()
}

fn take_node(id: u64, arena: &mut HashMap<u64, Comment>) -> Option<ThreadNode> {
    let comment = arena.remove(&id)?;
    let replies = comment
        .reply_ids
        .iter()
        .filter_map(|reply_id| take_node(*reply_id, arena))
        .collect();
    let score = comment.score();
    Some(ThreadNode {
        comment,
        score,
        replies,
    })
}
