#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use forum_core::{
    Article, CommentService, InMemoryStore, ManualTimeProvider, ModerationPolicy, UnitOfWork,
    User,
};

/// Fixed starting instant for every test clock.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// A seeded store with a service wired to a manual clock: three users and
/// one article, committed in a single batch.
pub struct Fixture {
    pub store: InMemoryStore,
    pub clock: ManualTimeProvider,
    pub service: CommentService,
    pub alice: u64,
    pub bob: u64,
    pub carol: u64,
    pub article: u64,
}

pub fn fixture() -> Fixture {
    fixture_with_policy(ModerationPolicy::default())
}

pub fn fixture_with_policy(policy: ModerationPolicy) -> Fixture {
    let store = InMemoryStore::new();
    let clock = ManualTimeProvider::new(t0());
    let service = CommentService::new(Arc::new(store.clone()))
        .with_policy(policy)
        .with_clock(Arc::new(clock.clone()));

    let uow = UnitOfWork::new(Arc::new(store.clone()));
    let mut alice = User::new("alice", t0());
    let mut bob = User::new("bob", t0());
    let mut carol = User::new("carol", t0());
    let mut article = Article::new("Hello world", t0());
    uow.users().insert(&mut alice).unwrap();
    uow.users().insert(&mut bob).unwrap();
    uow.users().insert(&mut carol).unwrap();
    uow.articles().insert(&mut article).unwrap();
    uow.commit().unwrap();

    Fixture {
        alice: alice.id,
        bob: bob.id,
        carol: carol.id,
        article: article.id,
        store,
        clock,
        service,
    }
}

impl Fixture {
    /// A unit of work over the fixture's store.
    pub fn uow(&self) -> UnitOfWork {
        UnitOfWork::new(Arc::new(self.store.clone()))
    }

    /// Reload a comment straight from the store.
    pub fn comment(&self, id: u64) -> forum_core::Comment {
        self.uow()
            .comments()
            .get_by_id(id)
            .unwrap()
            .expect("comment should exist")
    }
}
