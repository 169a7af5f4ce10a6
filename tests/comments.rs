mod support;

use std::time::Duration;

use chrono::Duration as ChronoDuration;
use forum_core::{DomainError, ModerationPolicy};
use support::{fixture, fixture_with_policy, t0};

#[test]
fn create_stamps_article_and_creation_time() {
    let fx = fixture();
    fx.clock.advance(ChronoDuration::seconds(42));

    let comment = fx.service.create(fx.alice, fx.article, "hello").unwrap();

    assert_ne!(comment.id, 0);
    assert_eq!(comment.article_id, fx.article);
    assert_eq!(comment.author_id, fx.alice);
    assert_eq!(comment.created_at, t0() + ChronoDuration::seconds(42));
    assert_eq!(comment.depth, 0);
    assert!(!comment.deleted);
    assert!(comment.edit.is_none());

    // Persisted with the store-assigned id.
    assert_eq!(fx.comment(comment.id).body, "hello");
}

#[test]
fn create_normalizes_text() {
    let fx = fixture();
    let comment = fx.service.create(fx.alice, fx.article, "  spaced out \n").unwrap();
    assert_eq!(comment.body, "spaced out");
}

#[test]
fn create_rejects_blank_text_without_commit() {
    let fx = fixture();
    let before = fx.store.commit_count();

    let err = fx.service.create(fx.alice, fx.article, "   ").unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(_)));
    assert_eq!(fx.store.commit_count(), before);
}

#[test]
fn create_requires_existing_user_and_article() {
    let fx = fixture();

    let err = fx.service.create(999, fx.article, "hi").unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "user", id: 999 }));

    let err = fx.service.create(fx.alice, 999, "hi").unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "article", id: 999 }));
}

#[test]
fn create_rejects_zero_ids() {
    let fx = fixture();
    let err = fx.service.create(0, fx.article, "hi").unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(_)));
}

#[test]
fn reply_grows_parent_by_one_and_inherits_article() {
    let fx = fixture();
    let parent = fx.service.create(fx.alice, fx.article, "top").unwrap();
    let before = fx.store.commit_count();

    let reply = fx.service.reply(parent.id, fx.bob, "nested").unwrap();

    // Child insert and parent update land in one commit.
    assert_eq!(fx.store.commit_count(), before + 1);
    assert_eq!(reply.article_id, parent.article_id);
    assert_eq!(reply.depth, 1);

    let parent = fx.comment(parent.id);
    assert_eq!(parent.reply_ids, vec![reply.id]);
}

#[test]
fn reply_to_missing_parent_fails() {
    let fx = fixture();
    let err = fx.service.reply(999, fx.bob, "into the void").unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "comment", id: 999 }));
}

#[test]
fn reply_nests_unbounded_depth() {
    let fx = fixture();
    let mut current = fx.service.create(fx.alice, fx.article, "level 0").unwrap();
    for level in 1..=4u32 {
        current = fx.service.reply(current.id, fx.bob, "deeper").unwrap();
        assert_eq!(current.depth, level);
    }
}

#[test]
fn edit_within_window_updates_text_and_stamps_record() {
    let fx = fixture_with_policy(ModerationPolicy::default().with_edit_window(Duration::from_secs(300)));
    let comment = fx.service.create(fx.alice, fx.article, "hello").unwrap();

    fx.clock.advance(ChronoDuration::seconds(100));
    let edited = fx.service.edit(comment.id, fx.alice, "hello again").unwrap();

    assert_eq!(edited.body, "hello again");
    assert_eq!(
        edited.edit.as_ref().unwrap().edited_at,
        t0() + ChronoDuration::seconds(100)
    );
    assert_eq!(fx.comment(comment.id).body, "hello again");
}

#[test]
fn edit_after_window_expires() {
    let fx = fixture_with_policy(ModerationPolicy::default().with_edit_window(Duration::from_secs(300)));
    let comment = fx.service.create(fx.alice, fx.article, "hello").unwrap();
    let before = fx.store.commit_count();

    fx.clock.advance(ChronoDuration::seconds(400));
    let err = fx.service.edit(comment.id, fx.alice, "too late").unwrap_err();

    assert!(matches!(err, DomainError::Expired { action: "edit", .. }));
    assert_eq!(fx.store.commit_count(), before);
    assert_eq!(fx.comment(comment.id).body, "hello");
}

#[test]
fn edit_window_anchors_at_creation_even_after_edits() {
    let fx = fixture_with_policy(ModerationPolicy::default().with_edit_window(Duration::from_secs(300)));
    let comment = fx.service.create(fx.alice, fx.article, "v1").unwrap();

    fx.clock.advance(ChronoDuration::seconds(250));
    fx.service.edit(comment.id, fx.alice, "v2").unwrap();

    // The earlier edit does not restart the window.
    fx.clock.advance(ChronoDuration::seconds(100));
    let err = fx.service.edit(comment.id, fx.alice, "v3").unwrap_err();
    assert!(matches!(err, DomainError::Expired { .. }));
}

#[test]
fn edit_by_non_author_is_forbidden() {
    let fx = fixture();
    let comment = fx.service.create(fx.alice, fx.article, "mine").unwrap();

    let err = fx.service.edit(comment.id, fx.bob, "stolen").unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[test]
fn edit_deleted_comment_is_forbidden() {
    let fx = fixture();
    let comment = fx.service.create(fx.alice, fx.article, "gone soon").unwrap();
    fx.service.delete(comment.id, fx.alice).unwrap();

    let err = fx.service.edit(comment.id, fx.alice, "resurrect").unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[test]
fn edit_missing_comment_fails() {
    let fx = fixture();
    let err = fx.service.edit(999, fx.alice, "ghost").unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "comment", .. }));
}

#[test]
fn delete_is_soft_and_keeps_text_and_children() {
    let fx = fixture();
    let parent = fx.service.create(fx.alice, fx.article, "tombstone me").unwrap();
    let reply = fx.service.reply(parent.id, fx.bob, "still here").unwrap();

    fx.service.delete(parent.id, fx.alice).unwrap();

    let parent = fx.comment(parent.id);
    assert!(parent.deleted);
    assert_eq!(parent.body, "tombstone me");
    assert_eq!(parent.reply_ids, vec![reply.id]);

    let reply = fx.comment(reply.id);
    assert!(!reply.deleted);
}

#[test]
fn delete_already_deleted_is_forbidden_without_commit() {
    let fx = fixture();
    let comment = fx.service.create(fx.alice, fx.article, "once").unwrap();
    fx.service.delete(comment.id, fx.alice).unwrap();
    let before = fx.store.commit_count();

    let err = fx.service.delete(comment.id, fx.alice).unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
    assert_eq!(fx.store.commit_count(), before);
}

#[test]
fn delete_after_window_expires() {
    let fx = fixture_with_policy(ModerationPolicy::default().with_delete_window(Duration::from_secs(60)));
    let comment = fx.service.create(fx.alice, fx.article, "linger").unwrap();

    fx.clock.advance(ChronoDuration::seconds(61));
    let err = fx.service.delete(comment.id, fx.alice).unwrap_err();
    assert!(matches!(err, DomainError::Expired { action: "delete", .. }));
}

#[test]
fn delete_by_non_author_is_forbidden() {
    let fx = fixture();
    let comment = fx.service.create(fx.alice, fx.article, "mine").unwrap();

    let err = fx.service.delete(comment.id, fx.bob).unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[test]
fn predicates_false_for_deleted_regardless_of_author_or_window() {
    let fx = fixture();
    let comment = fx.service.create(fx.alice, fx.article, "short lived").unwrap();
    fx.service.delete(comment.id, fx.alice).unwrap();
    let comment = fx.comment(comment.id);

    assert!(!fx.service.can_edit(fx.alice, &comment));
    assert!(!fx.service.can_delete(fx.alice, &comment));
}

#[test]
fn predicates_false_for_non_author() {
    let fx = fixture();
    let comment = fx.service.create(fx.alice, fx.article, "mine").unwrap();

    assert!(!fx.service.can_edit(fx.bob, &comment));
    assert!(!fx.service.can_delete(fx.bob, &comment));
}

#[test]
fn predicates_respect_window_boundary() {
    let fx = fixture_with_policy(
        ModerationPolicy::default()
            .with_edit_window(Duration::from_secs(300))
            .with_delete_window(Duration::from_secs(300)),
    );
    let comment = fx.service.create(fx.alice, fx.article, "timed").unwrap();

    // One second inside the window.
    fx.clock.set(t0() + ChronoDuration::seconds(299));
    assert!(fx.service.can_edit(fx.alice, &comment));
    assert!(fx.service.can_delete(fx.alice, &comment));

    // Exactly at the boundary: still permitted.
    fx.clock.set(t0() + ChronoDuration::seconds(300));
    assert!(fx.service.can_edit(fx.alice, &comment));

    // One past: expired.
    fx.clock.set(t0() + ChronoDuration::seconds(301));
    assert!(!fx.service.can_edit(fx.alice, &comment));
    assert!(!fx.service.can_delete(fx.alice, &comment));
}

#[test]
fn zero_window_denies_once_any_time_elapsed() {
    let fx = fixture_with_policy(ModerationPolicy::default().with_edit_window(Duration::ZERO));
    let comment = fx.service.create(fx.alice, fx.article, "instant").unwrap();

    // No time elapsed yet: the boundary instant itself is permitted.
    assert!(fx.service.can_edit(fx.alice, &comment));

    fx.clock.advance(ChronoDuration::seconds(1));
    assert!(!fx.service.can_edit(fx.alice, &comment));
    let err = fx.service.edit(comment.id, fx.alice, "nope").unwrap_err();
    assert!(matches!(err, DomainError::Expired { .. }));
}

#[test]
fn can_have_reply_honors_depth_limit_and_deletion() {
    let fx = fixture_with_policy(ModerationPolicy::default().with_max_reply_depth(Some(1)));
    let top = fx.service.create(fx.alice, fx.article, "top").unwrap();
    let reply = fx.service.reply(top.id, fx.bob, "nested").unwrap();

    assert!(fx.service.can_have_reply(&top));
    assert!(!fx.service.can_have_reply(&reply));

    fx.service.delete(top.id, fx.alice).unwrap();
    assert!(!fx.service.can_have_reply(&fx.comment(top.id)));

    // The policy hook is advisory: reply itself still accepts.
    assert!(fx.service.reply(reply.id, fx.alice, "deeper anyway").is_ok());
}
