use sqlx::{SqliteConnection, SqlitePool};

use crate::models::FriendshipRow;

const SQL_INSERT_FRIENDSHIP: &str = r#"
INSERT INTO friendships (
  friendship_id,
  from_user_id,
  to_user_id,
  status
) VALUES (?1, ?2, ?3, 'pending')
"#;

pub async fn insert_pending(
    pool: &SqlitePool,
    friendship_id: &str,
    from_user_id: &str,
    to_user_id: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_FRIENDSHIP)
        .bind(friendship_id)
        .bind(from_user_id)
        .bind(to_user_id)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_LOAD_FRIENDSHIP: &str = r#"
SELECT
  friendship_id,
  from_user_id,
  to_user_id,
  status,
  created_at,
  updated_at
FROM friendships
WHERE friendship_id = ?1
LIMIT 1
"#;

pub async fn load_friendship(
    pool: &SqlitePool,
    friendship_id: &str,
) -> sqlx::Result<Option<FriendshipRow>> {
    sqlx::query_as::<_, FriendshipRow>(SQL_LOAD_FRIENDSHIP)
        .bind(friendship_id)
        .fetch_optional(pool)
        .await
}

pub async fn load_friendship_tx(
    conn: &mut SqliteConnection,
    friendship_id: &str,
) -> sqlx::Result<Option<FriendshipRow>> {
    sqlx::query_as::<_, FriendshipRow>(SQL_LOAD_FRIENDSHIP)
        .bind(friendship_id)
        .fetch_optional(conn)
        .await
}

const SQL_FIND_DIRECTED: &str = r#"
SELECT
  friendship_id,
  from_user_id,
  to_user_id,
  status,
  created_at,
  updated_at
FROM friendships
WHERE from_user_id = ?1
  AND to_user_id = ?2
LIMIT 1
"#;

/// Lookup in the exact request direction; at most one row can exist
/// per direction.
pub async fn find_directed(
    pool: &SqlitePool,
    from_user_id: &str,
    to_user_id: &str,
) -> sqlx::Result<Option<FriendshipRow>> {
    sqlx::query_as::<_, FriendshipRow>(SQL_FIND_DIRECTED)
        .bind(from_user_id)
        .bind(to_user_id)
        .fetch_optional(pool)
        .await
}

const SQL_HAS_ACCEPTED: &str = r#"
SELECT COUNT(*) AS n
FROM friendships
WHERE status = 'accepted'
  AND ((from_user_id = ?1 AND to_user_id = ?2)
    OR (from_user_id = ?2 AND to_user_id = ?1))
"#;

/// Accepted friendship between two users, checked in both directions.
pub async fn has_accepted_friendship(
    pool: &SqlitePool,
    user_a: &str,
    user_b: &str,
) -> sqlx::Result<bool> {
    let n: i64 = sqlx::query_scalar(SQL_HAS_ACCEPTED)
        .bind(user_a)
        .bind(user_b)
        .fetch_one(pool)
        .await?;
    Ok(n > 0)
}

const SQL_LIST_PENDING_INCOMING: &str = r#"
SELECT
  friendship_id,
  from_user_id,
  to_user_id,
  status,
  created_at,
  updated_at
FROM friendships
WHERE to_user_id = ?1
  AND status = 'pending'
ORDER BY created_at DESC
"#;

const SQL_LIST_PENDING_OUTGOING: &str = r#"
SELECT
  friendship_id,
  from_user_id,
  to_user_id,
  status,
  created_at,
  updated_at
FROM friendships
WHERE from_user_id = ?1
  AND status = 'pending'
ORDER BY created_at DESC
"#;

pub async fn list_pending_incoming(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<FriendshipRow>> {
    sqlx::query_as::<_, FriendshipRow>(SQL_LIST_PENDING_INCOMING)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn list_pending_outgoing(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<FriendshipRow>> {
    sqlx::query_as::<_, FriendshipRow>(SQL_LIST_PENDING_OUTGOING)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct FriendRow {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub city: Option<String>,
    pub profile_picture_url: Option<String>,
    pub friendship_id: String,
}

const SQL_LIST_ACCEPTED_FRIENDS: &str = r#"
SELECT
  u.user_id,
  u.username,
  u.display_name,
  u.city,
  u.profile_picture_url,
  f.friendship_id
FROM friendships f
JOIN users u ON u.user_id = CASE
    WHEN f.from_user_id = ?1 THEN f.to_user_id
    ELSE f.from_user_id
  END
WHERE f.status = 'accepted'
  AND (f.from_user_id = ?1 OR f.to_user_id = ?1)
  AND (u.is_deleted = 0 OR u.is_deleted IS NULL)
ORDER BY u.username ASC
"#;

pub async fn list_accepted_friends(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<FriendRow>> {
    sqlx::query_as::<_, FriendRow>(SQL_LIST_ACCEPTED_FRIENDS)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

const SQL_TRANSITION_FROM_PENDING: &str = r#"
UPDATE friendships
SET status = ?2,
    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
WHERE friendship_id = ?1
  AND status = 'pending'
"#;

/// Guarded transition: affects zero rows when the friendship already left
/// `pending`, which the service maps to InvalidState.
pub async fn transition_from_pending_tx(
    conn: &mut SqliteConnection,
    friendship_id: &str,
    new_status: &str,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_TRANSITION_FROM_PENDING)
        .bind(friendship_id)
        .bind(new_status)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

const SQL_INCREMENT_NUM_FRIENDS: &str = r#"
UPDATE users
SET num_friends = num_friends + 1
WHERE user_id = ?1
"#;

pub async fn increment_num_friends_tx(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INCREMENT_NUM_FRIENDS)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}

const SQL_DELETE_FRIENDSHIP: &str = r#"
DELETE FROM friendships
WHERE friendship_id = ?1
"#;

pub async fn delete_friendship(pool: &SqlitePool, friendship_id: &str) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_FRIENDSHIP)
        .bind(friendship_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
