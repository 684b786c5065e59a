#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use pawsconnect::database::{schema, user_repo};

/// In-memory database; a single connection so every query sees the same
/// store.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    schema::ensure_schema(&pool).await.expect("schema");
    pool
}

pub async fn create_user(pool: &SqlitePool, user_id: &str, username: &str) {
    create_user_inner(pool, user_id, username, None, None).await;
}

pub async fn create_user_at(
    pool: &SqlitePool,
    user_id: &str,
    username: &str,
    latitude: f64,
    longitude: f64,
) {
    create_user_inner(pool, user_id, username, Some(latitude), Some(longitude)).await;
}

async fn create_user_inner(
    pool: &SqlitePool,
    user_id: &str,
    username: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
) {
    let email = format!("{}@example.com", username);
    user_repo::insert_user(
        pool,
        user_repo::NewUser {
            user_id,
            username,
            display_name: username,
            email: &email,
            first_name: None,
            last_name: None,
            about_me: None,
            city: None,
            state: None,
            zip_code: None,
            latitude,
            longitude,
            profile_picture_url: None,
            preferred_language: None,
            profile_visibility: None,
            has_pets: false,
            profile_incomplete: true,
        },
    )
    .await
    .expect("insert user");
}

/// Direct post insert with a controlled timestamp, so ordering assertions
/// are deterministic.
pub async fn insert_post_at(
    pool: &SqlitePool,
    post_id: &str,
    user_id: &str,
    content: &str,
    visibility: &str,
    timestamp: &str,
) {
    sqlx::query(
        "INSERT INTO posts (post_id, user_id, content, visibility, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(post_id)
    .bind(user_id)
    .bind(content)
    .bind(visibility)
    .bind(timestamp)
    .execute(pool)
    .await
    .expect("insert post");
}
