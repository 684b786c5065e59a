mod common;

use std::collections::HashSet;

use pawsconnect::services::feed_service::{self, FeedQuery};
use pawsconnect::services::{friendship_service, post_service};

use common::{create_user, insert_post_at, test_pool};

async fn befriend(pool: &sqlx::SqlitePool, from: &str, to: &str) {
    let f = friendship_service::request_friendship(pool, from, to)
        .await
        .unwrap();
    friendship_service::accept_friendship(pool, &f.friendship_id, to)
        .await
        .unwrap();
}

#[tokio::test]
async fn feed_unions_own_public_and_friend_posts() {
    let pool = test_pool().await;
    create_user(&pool, "u", "u").await;
    create_user(&pool, "friend", "friend").await;
    create_user(&pool, "stranger", "stranger").await;
    befriend(&pool, "u", "friend").await;

    insert_post_at(&pool, "own_fo", "u", "own friends-only", "friends_only", "2026-01-01T10:00:00.000Z").await;
    insert_post_at(&pool, "own_pub", "u", "own public", "public", "2026-01-01T11:00:00.000Z").await;
    insert_post_at(&pool, "fr_fo", "friend", "friend friends-only", "friends_only", "2026-01-01T12:00:00.000Z").await;
    insert_post_at(&pool, "st_pub", "stranger", "stranger public", "public", "2026-01-01T13:00:00.000Z").await;
    insert_post_at(&pool, "st_fo", "stranger", "stranger friends-only", "friends_only", "2026-01-01T14:00:00.000Z").await;

    let page = feed_service::load_feed(&pool, "u", &FeedQuery::default())
        .await
        .unwrap();
    let ids: Vec<&str> = page.posts.iter().map(|p| p.post_id.as_str()).collect();

    // Newest first, stranger's friends-only post absent.
    assert_eq!(ids, vec!["st_pub", "fr_fo", "own_pub", "own_fo"]);
}

#[tokio::test]
async fn feed_has_no_duplicates_even_when_clauses_overlap() {
    let pool = test_pool().await;
    create_user(&pool, "u", "u").await;

    // Own public post matches both the "own" and the "public" clause.
    insert_post_at(&pool, "p1", "u", "mine and public", "public", "2026-01-01T10:00:00.000Z").await;

    let page = feed_service::load_feed(&pool, "u", &FeedQuery::default())
        .await
        .unwrap();
    let mut seen = HashSet::new();
    for post in &page.posts {
        assert!(seen.insert(post.post_id.clone()), "duplicate {}", post.post_id);
    }
    assert_eq!(page.posts.len(), 1);
}

#[tokio::test]
async fn feed_excludes_soft_deleted_posts() {
    let pool = test_pool().await;
    create_user(&pool, "u", "u").await;
    insert_post_at(&pool, "keep", "u", "keep", "public", "2026-01-01T10:00:00.000Z").await;
    insert_post_at(&pool, "gone", "u", "gone", "public", "2026-01-01T11:00:00.000Z").await;

    post_service::delete_post(&pool, "gone", "u").await.unwrap();

    let page = feed_service::load_feed(&pool, "u", &FeedQuery::default())
        .await
        .unwrap();
    let ids: Vec<&str> = page.posts.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec!["keep"]);
}

#[tokio::test]
async fn feed_paginates_newest_first() {
    let pool = test_pool().await;
    create_user(&pool, "u", "u").await;
    for i in 0..5 {
        insert_post_at(
            &pool,
            &format!("p{}", i),
            "u",
            "post",
            "public",
            &format!("2026-01-01T1{}:00:00.000Z", i),
        )
        .await;
    }

    let first = feed_service::load_feed(
        &pool,
        "u",
        &FeedQuery {
            page: Some(1),
            page_size: Some(2),
        },
    )
    .await
    .unwrap();
    let second = feed_service::load_feed(
        &pool,
        "u",
        &FeedQuery {
            page: Some(2),
            page_size: Some(2),
        },
    )
    .await
    .unwrap();

    let first_ids: Vec<&str> = first.posts.iter().map(|p| p.post_id.as_str()).collect();
    let second_ids: Vec<&str> = second.posts.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(first_ids, vec!["p4", "p3"]);
    assert_eq!(second_ids, vec!["p2", "p1"]);

    // An oversized page_size is clamped, not an error.
    let clamped = feed_service::load_feed(
        &pool,
        "u",
        &FeedQuery {
            page: Some(1),
            page_size: Some(10_000),
        },
    )
    .await
    .unwrap();
    assert_eq!(clamped.page_size, feed_service::MAX_PAGE_SIZE);
    assert_eq!(clamped.posts.len(), 5);
}

#[tokio::test]
async fn friends_only_scenario_feed_and_stranger() {
    let pool = test_pool().await;
    create_user(&pool, "a", "a").await;
    create_user(&pool, "b", "b").await;
    create_user(&pool, "c", "c").await;
    befriend(&pool, "a", "b").await;

    insert_post_at(&pool, "p1", "a", "friends only", "friends_only", "2026-01-01T10:00:00.000Z").await;

    let b_feed = feed_service::load_feed(&pool, "b", &FeedQuery::default())
        .await
        .unwrap();
    assert!(b_feed.posts.iter().any(|p| p.post_id == "p1"));

    let c_feed = feed_service::load_feed(&pool, "c", &FeedQuery::default())
        .await
        .unwrap();
    assert!(!c_feed.posts.iter().any(|p| p.post_id == "p1"));
}
