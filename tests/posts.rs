mod common;

use pawsconnect::error::ServiceError;
use pawsconnect::services::friendship_service;
use pawsconnect::services::pet_service::{self, NewPetRequest};
use pawsconnect::services::post_service::{self, NewPostRequest};

use common::{create_user, insert_post_at, test_pool};

#[tokio::test]
async fn single_post_fetch_is_gated_by_visibility() {
    let pool = test_pool().await;
    create_user(&pool, "alice", "alice").await;
    create_user(&pool, "carol", "carol").await;
    insert_post_at(
        &pool,
        "p1",
        "alice",
        "for friends",
        "friends_only",
        "2026-01-01T10:00:00.000Z",
    )
    .await;

    let stranger = post_service::load_post(&pool, Some("carol"), "p1").await;
    assert!(matches!(stranger, Err(ServiceError::Forbidden)));

    let owner = post_service::load_post(&pool, Some("alice"), "p1")
        .await
        .unwrap();
    assert_eq!(owner.post_id, "p1");
}

#[tokio::test]
async fn user_post_listing_hides_friends_only_from_strangers() {
    let pool = test_pool().await;
    create_user(&pool, "alice", "alice").await;
    create_user(&pool, "bob", "bob").await;
    create_user(&pool, "carol", "carol").await;

    let f = friendship_service::request_friendship(&pool, "bob", "alice")
        .await
        .unwrap();
    friendship_service::accept_friendship(&pool, &f.friendship_id, "alice")
        .await
        .unwrap();

    insert_post_at(&pool, "pub", "alice", "public", "public", "2026-01-01T10:00:00.000Z").await;
    insert_post_at(&pool, "fo", "alice", "friends", "friends_only", "2026-01-01T11:00:00.000Z").await;

    let for_friend = post_service::list_user_posts(&pool, Some("bob"), "alice")
        .await
        .unwrap();
    assert_eq!(for_friend.len(), 2);

    let for_stranger = post_service::list_user_posts(&pool, Some("carol"), "alice")
        .await
        .unwrap();
    let ids: Vec<&str> = for_stranger.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec!["pub"]);

    let for_anonymous = post_service::list_user_posts(&pool, None, "alice")
        .await
        .unwrap();
    assert_eq!(for_anonymous.len(), 1);
}

#[tokio::test]
async fn commenting_and_liking_require_seeing_the_post() {
    let pool = test_pool().await;
    create_user(&pool, "alice", "alice").await;
    create_user(&pool, "carol", "carol").await;
    insert_post_at(
        &pool,
        "p1",
        "alice",
        "for friends",
        "friends_only",
        "2026-01-01T10:00:00.000Z",
    )
    .await;

    let comment = post_service::add_comment(&pool, "carol", "p1", "nice dog").await;
    assert!(matches!(comment, Err(ServiceError::Forbidden)));
    let like = post_service::like_post(&pool, "carol", "p1").await;
    assert!(matches!(like, Err(ServiceError::Forbidden)));

    let comments = post_service::add_comment(&pool, "alice", "p1", "thanks everyone")
        .await
        .unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_username, "alice");
}

#[tokio::test]
async fn likes_are_idempotent() {
    let pool = test_pool().await;
    create_user(&pool, "alice", "alice").await;
    create_user(&pool, "bob", "bob").await;
    insert_post_at(&pool, "p1", "alice", "hello", "public", "2026-01-01T10:00:00.000Z").await;

    post_service::like_post(&pool, "bob", "p1").await.unwrap();
    post_service::like_post(&pool, "bob", "p1").await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = 'p1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    post_service::unlike_post(&pool, "bob", "p1").await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = 'p1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn only_the_owner_deletes_a_post() {
    let pool = test_pool().await;
    create_user(&pool, "alice", "alice").await;
    create_user(&pool, "bob", "bob").await;
    insert_post_at(&pool, "p1", "alice", "hello", "public", "2026-01-01T10:00:00.000Z").await;

    let by_other = post_service::delete_post(&pool, "p1", "bob").await;
    assert!(matches!(by_other, Err(ServiceError::Forbidden)));

    post_service::delete_post(&pool, "p1", "alice").await.unwrap();
    let gone = post_service::load_post(&pool, Some("alice"), "p1").await;
    assert!(matches!(gone, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn create_post_tags_only_your_own_pets() {
    let pool = test_pool().await;
    create_user(&pool, "alice", "alice").await;
    create_user(&pool, "bob", "bob").await;

    let pet = pet_service::create_pet(
        &pool,
        "bob",
        NewPetRequest {
            name: "Rex".to_string(),
            pet_type: "dog".to_string(),
            breed: None,
            color: None,
            age: None,
            description: None,
            profile_picture_url: None,
        },
    )
    .await
    .unwrap();

    let request = NewPostRequest {
        content: "look at this dog".to_string(),
        visibility: "public".to_string(),
        photo_url: None,
        pet_ids: vec![pet.pet_id.clone()],
    };
    let result = post_service::create_post(&pool, "alice", request).await;
    assert!(matches!(result, Err(ServiceError::Forbidden)));

    let own = post_service::create_post(
        &pool,
        "bob",
        NewPostRequest {
            content: "my dog".to_string(),
            visibility: "public".to_string(),
            photo_url: None,
            pet_ids: vec![pet.pet_id.clone()],
        },
    )
    .await
    .unwrap();
    assert_eq!(own.tagged_pet_ids, vec![pet.pet_id]);
}
