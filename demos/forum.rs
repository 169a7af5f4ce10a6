//! End-to-end walkthrough: seed a user base and an article, post a small
//! comment thread, vote, moderate, and print the assembled tree.
//!
//! Run with `cargo run --example forum` (add `RUST_LOG=debug` for the
//! data-access log).

use std::sync::Arc;

use chrono::Utc;
use forum_core::{
    Article, CommentService, InMemoryStore, ModerationPolicy, ThreadNode, UnitOfWork, User,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let store = InMemoryStore::new();

    // Seed collaborators the engine resolves by id.
    let uow = UnitOfWork::new(Arc::new(store.clone()));
    let mut ada = User::new("ada", Utc::now());
    let mut grace = User::new("grace", Utc::now());
    let mut article = Article::new("On composable queries", Utc::now());
    uow.users().insert(&mut ada)?;
    uow.users().insert(&mut grace)?;
    uow.articles().insert(&mut article)?;
    uow.commit()?;

    let service = CommentService::new(Arc::new(store.clone()))
        .with_policy(ModerationPolicy::default().with_max_reply_depth(Some(5)));

    service.on_event("CommentPosted", |payload: String| {
        println!("event CommentPosted: {}", payload);
    });

    let top = service.create(ada.id, article.id, "Great read - one question about tie-breaks.")?;
    let reply = service.reply(top.id, grace.id, "They apply in the order added, ties only.")?;
    service.reply(reply.id, ada.id, "That settles it, thanks!")?;

    service.add_vote(top.id, grace.id, true)?;
    service.add_vote(reply.id, ada.id, true)?;

    // The author thinks better of the phrasing while the window is open.
    service.edit(top.id, ada.id, "Great read - how do tie-break criteria compose?")?;

    println!("\nthread for \"{}\":", article.title);
    for node in service.article_thread(article.id)? {
        print_node(&node, 0);
    }

    Ok(())
}

fn print_node(node: &ThreadNode, indent: usize) {
    let pad = "  ".repeat(indent);
    let edited = if node.comment.is_edited() { " (edited)" } else { "" };
    println!(
        "{}[{:+}] #{}{}: {}",
        pad, node.score, node.comment.id, edited, node.comment.body
    );
    for reply in &node.replies {
        print_node(reply, indent + 1);
    }
}
