mod common;

use pawsconnect::database::post_repo;
use pawsconnect::services::{friendship_service, visibility_service};

use common::{create_user, insert_post_at, test_pool};

#[tokio::test]
async fn public_posts_are_visible_to_anyone() {
    let pool = test_pool().await;
    create_user(&pool, "owner", "owner").await;
    create_user(&pool, "stranger", "stranger").await;
    insert_post_at(
        &pool,
        "p1",
        "owner",
        "hello world",
        "public",
        "2026-01-01T10:00:00.000Z",
    )
    .await;

    let post = post_repo::load_post(&pool, "p1").await.unwrap().unwrap();

    assert!(visibility_service::can_view_post(&pool, None, &post)
        .await
        .unwrap());
    assert!(
        visibility_service::can_view_post(&pool, Some("stranger"), &post)
            .await
            .unwrap()
    );
    assert!(
        visibility_service::can_view_post(&pool, Some("owner"), &post)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn friends_only_post_is_scoped_to_owner_and_accepted_friends() {
    let pool = test_pool().await;
    create_user(&pool, "alice", "alice").await;
    create_user(&pool, "bob", "bob").await;
    create_user(&pool, "carol", "carol").await;
    create_user(&pool, "dave", "dave").await;

    // bob is an accepted friend; dave only has a pending request out.
    let f = friendship_service::request_friendship(&pool, "bob", "alice")
        .await
        .unwrap();
    friendship_service::accept_friendship(&pool, &f.friendship_id, "alice")
        .await
        .unwrap();
    friendship_service::request_friendship(&pool, "dave", "alice")
        .await
        .unwrap();

    insert_post_at(
        &pool,
        "p1",
        "alice",
        "for friends",
        "friends_only",
        "2026-01-01T10:00:00.000Z",
    )
    .await;
    let post = post_repo::load_post(&pool, "p1").await.unwrap().unwrap();

    assert!(
        visibility_service::can_view_post(&pool, Some("alice"), &post)
            .await
            .unwrap()
    );
    assert!(visibility_service::can_view_post(&pool, Some("bob"), &post)
        .await
        .unwrap());
    assert!(
        !visibility_service::can_view_post(&pool, Some("carol"), &post)
            .await
            .unwrap()
    );
    assert!(
        !visibility_service::can_view_post(&pool, Some("dave"), &post)
            .await
            .unwrap()
    );
    assert!(!visibility_service::can_view_post(&pool, None, &post)
        .await
        .unwrap());
}

#[tokio::test]
async fn acceptance_direction_does_not_matter() {
    let pool = test_pool().await;
    create_user(&pool, "alice", "alice").await;
    create_user(&pool, "bob", "bob").await;

    // alice sent the request, so the edge is stored alice -> bob.
    let f = friendship_service::request_friendship(&pool, "alice", "bob")
        .await
        .unwrap();
    friendship_service::accept_friendship(&pool, &f.friendship_id, "bob")
        .await
        .unwrap();

    insert_post_at(
        &pool,
        "p1",
        "alice",
        "for friends",
        "friends_only",
        "2026-01-01T10:00:00.000Z",
    )
    .await;
    insert_post_at(
        &pool,
        "p2",
        "bob",
        "also for friends",
        "friends_only",
        "2026-01-01T11:00:00.000Z",
    )
    .await;

    let p1 = post_repo::load_post(&pool, "p1").await.unwrap().unwrap();
    let p2 = post_repo::load_post(&pool, "p2").await.unwrap().unwrap();

    assert!(visibility_service::can_view_post(&pool, Some("bob"), &p1)
        .await
        .unwrap());
    assert!(visibility_service::can_view_post(&pool, Some("alice"), &p2)
        .await
        .unwrap());
}
