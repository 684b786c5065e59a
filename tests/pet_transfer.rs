mod common;

use pawsconnect::database::{pet_repo, user_repo};
use pawsconnect::error::ServiceError;
use pawsconnect::services::pet_service::{self, NewPetRequest};
use pawsconnect::services::pet_transfer_service;

use common::{create_user, test_pool};

async fn create_dog(pool: &sqlx::SqlitePool, owner: &str, name: &str) -> String {
    let pet = pet_service::create_pet(
        pool,
        owner,
        NewPetRequest {
            name: name.to_string(),
            pet_type: "dog".to_string(),
            breed: None,
            color: None,
            age: Some(2),
            description: None,
            profile_picture_url: None,
        },
    )
    .await
    .unwrap();
    pet.pet_id
}

#[tokio::test]
async fn approve_moves_ownership_and_flags_atomically() {
    let pool = test_pool().await;
    create_user(&pool, "a", "a").await;
    create_user(&pool, "b", "b").await;
    let pet_id = create_dog(&pool, "a", "Rex").await;

    let transfer = pet_transfer_service::request_transfer(&pool, &pet_id, "a", "b", Some("enjoy"))
        .await
        .unwrap();
    assert_eq!(transfer.status, "pending");

    let approved = pet_transfer_service::approve_transfer(&pool, &transfer.transfer_id, "b")
        .await
        .unwrap();
    assert_eq!(approved.status, "approved");

    let pet = pet_repo::load_pet(&pool, &pet_id).await.unwrap().unwrap();
    assert_eq!(pet.owner_id, "b");

    // has_pets follows the ownership on both sides.
    let a = user_repo::load_user(&pool, "a").await.unwrap().unwrap();
    let b = user_repo::load_user(&pool, "b").await.unwrap().unwrap();
    assert_eq!(a.has_pets, Some(0));
    assert_eq!(b.has_pets, Some(1));
}

#[tokio::test]
async fn approving_twice_fails_with_invalid_state() {
    let pool = test_pool().await;
    create_user(&pool, "a", "a").await;
    create_user(&pool, "b", "b").await;
    let pet_id = create_dog(&pool, "a", "Rex").await;

    let transfer = pet_transfer_service::request_transfer(&pool, &pet_id, "a", "b", None)
        .await
        .unwrap();
    pet_transfer_service::approve_transfer(&pool, &transfer.transfer_id, "b")
        .await
        .unwrap();

    let again = pet_transfer_service::approve_transfer(&pool, &transfer.transfer_id, "b").await;
    assert!(matches!(again, Err(ServiceError::InvalidState)));
}

#[tokio::test]
async fn request_guards_owner_target_and_duplicates() {
    let pool = test_pool().await;
    create_user(&pool, "a", "a").await;
    create_user(&pool, "b", "b").await;
    create_user(&pool, "c", "c").await;
    let pet_id = create_dog(&pool, "a", "Rex").await;

    let not_owner = pet_transfer_service::request_transfer(&pool, &pet_id, "b", "c", None).await;
    assert!(matches!(not_owner, Err(ServiceError::Forbidden)));

    let to_self = pet_transfer_service::request_transfer(&pool, &pet_id, "a", "a", None).await;
    assert!(matches!(to_self, Err(ServiceError::SelfRequest)));

    pet_transfer_service::request_transfer(&pool, &pet_id, "a", "b", None)
        .await
        .unwrap();
    let second = pet_transfer_service::request_transfer(&pool, &pet_id, "a", "c", None).await;
    assert!(matches!(second, Err(ServiceError::DuplicateRequest)));
}

#[tokio::test]
async fn only_the_recipient_approves_only_the_sender_cancels() {
    let pool = test_pool().await;
    create_user(&pool, "a", "a").await;
    create_user(&pool, "b", "b").await;
    let pet_id = create_dog(&pool, "a", "Rex").await;

    let transfer = pet_transfer_service::request_transfer(&pool, &pet_id, "a", "b", None)
        .await
        .unwrap();

    let approve_by_sender =
        pet_transfer_service::approve_transfer(&pool, &transfer.transfer_id, "a").await;
    assert!(matches!(approve_by_sender, Err(ServiceError::Forbidden)));

    let cancel_by_recipient =
        pet_transfer_service::cancel_transfer(&pool, &transfer.transfer_id, "b").await;
    assert!(matches!(cancel_by_recipient, Err(ServiceError::Forbidden)));

    let canceled = pet_transfer_service::cancel_transfer(&pool, &transfer.transfer_id, "a")
        .await
        .unwrap();
    assert_eq!(canceled.status, "canceled");

    // Ownership never moved.
    let pet = pet_repo::load_pet(&pool, &pet_id).await.unwrap().unwrap();
    assert_eq!(pet.owner_id, "a");
}

#[tokio::test]
async fn reject_keeps_ownership_and_is_terminal() {
    let pool = test_pool().await;
    create_user(&pool, "a", "a").await;
    create_user(&pool, "b", "b").await;
    let pet_id = create_dog(&pool, "a", "Rex").await;

    let transfer = pet_transfer_service::request_transfer(&pool, &pet_id, "a", "b", None)
        .await
        .unwrap();
    let rejected = pet_transfer_service::reject_transfer(&pool, &transfer.transfer_id, "b")
        .await
        .unwrap();
    assert_eq!(rejected.status, "rejected");

    let approve_after =
        pet_transfer_service::approve_transfer(&pool, &transfer.transfer_id, "b").await;
    assert!(matches!(approve_after, Err(ServiceError::InvalidState)));

    let pet = pet_repo::load_pet(&pool, &pet_id).await.unwrap().unwrap();
    assert_eq!(pet.owner_id, "a");
}
