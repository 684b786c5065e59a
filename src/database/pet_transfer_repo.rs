use sqlx::{SqliteConnection, SqlitePool};

use crate::models::PetTransferRow;

const SQL_INSERT_TRANSFER: &str = r#"
INSERT INTO pet_transfer_requests (
  transfer_id,
  pet_id,
  from_user_id,
  to_user_id,
  status,
  message
) VALUES (?1, ?2, ?3, ?4, 'pending', ?5)
"#;

pub async fn insert_pending(
    pool: &SqlitePool,
    transfer_id: &str,
    pet_id: &str,
    from_user_id: &str,
    to_user_id: &str,
    message: Option<&str>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_TRANSFER)
        .bind(transfer_id)
        .bind(pet_id)
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(message)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_LOAD_TRANSFER: &str = r#"
SELECT
  transfer_id,
  pet_id,
  from_user_id,
  to_user_id,
  status,
  message,
  created_at,
  updated_at
FROM pet_transfer_requests
WHERE transfer_id = ?1
LIMIT 1
"#;

pub async fn load_transfer(
    pool: &SqlitePool,
    transfer_id: &str,
) -> sqlx::Result<Option<PetTransferRow>> {
    sqlx::query_as::<_, PetTransferRow>(SQL_LOAD_TRANSFER)
        .bind(transfer_id)
        .fetch_optional(pool)
        .await
}

pub async fn load_transfer_tx(
    conn: &mut SqliteConnection,
    transfer_id: &str,
) -> sqlx::Result<Option<PetTransferRow>> {
    sqlx::query_as::<_, PetTransferRow>(SQL_LOAD_TRANSFER)
        .bind(transfer_id)
        .fetch_optional(conn)
        .await
}

const SQL_FIND_PENDING_FOR_PET: &str = r#"
SELECT
  transfer_id,
  pet_id,
  from_user_id,
  to_user_id,
  status,
  message,
  created_at,
  updated_at
FROM pet_transfer_requests
WHERE pet_id = ?1
  AND status = 'pending'
LIMIT 1
"#;

pub async fn find_pending_for_pet(
    pool: &SqlitePool,
    pet_id: &str,
) -> sqlx::Result<Option<PetTransferRow>> {
    sqlx::query_as::<_, PetTransferRow>(SQL_FIND_PENDING_FOR_PET)
        .bind(pet_id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_INCOMING: &str = r#"
SELECT
  transfer_id,
  pet_id,
  from_user_id,
  to_user_id,
  status,
  message,
  created_at,
  updated_at
FROM pet_transfer_requests
WHERE to_user_id = ?1
ORDER BY created_at DESC
"#;

const SQL_LIST_OUTGOING: &str = r#"
SELECT
  transfer_id,
  pet_id,
  from_user_id,
  to_user_id,
  status,
  message,
  created_at,
  updated_at
FROM pet_transfer_requests
WHERE from_user_id = ?1
ORDER BY created_at DESC
"#;

pub async fn list_incoming(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Vec<PetTransferRow>> {
    sqlx::query_as::<_, PetTransferRow>(SQL_LIST_INCOMING)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn list_outgoing(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Vec<PetTransferRow>> {
    sqlx::query_as::<_, PetTransferRow>(SQL_LIST_OUTGOING)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

const SQL_TRANSITION_FROM_PENDING: &str = r#"
UPDATE pet_transfer_requests
SET status = ?2,
    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
WHERE transfer_id = ?1
  AND status = 'pending'
"#;

pub async fn transition_from_pending_tx(
    conn: &mut SqliteConnection,
    transfer_id: &str,
    new_status: &str,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_TRANSITION_FROM_PENDING)
        .bind(transfer_id)
        .bind(new_status)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

const SQL_REASSIGN_PET_OWNER: &str = r#"
UPDATE pets
SET owner_id = ?2
WHERE pet_id = ?1
  AND (is_deleted = 0 OR is_deleted IS NULL)
"#;

pub async fn reassign_pet_owner_tx(
    conn: &mut SqliteConnection,
    pet_id: &str,
    new_owner_id: &str,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_REASSIGN_PET_OWNER)
        .bind(pet_id)
        .bind(new_owner_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

const SQL_REFRESH_HAS_PETS: &str = r#"
UPDATE users
SET has_pets = EXISTS (
  SELECT 1 FROM pets
  WHERE owner_id = ?1
    AND (is_deleted = 0 OR is_deleted IS NULL)
)
WHERE user_id = ?1
"#;

pub async fn refresh_has_pets_tx(conn: &mut SqliteConnection, user_id: &str) -> sqlx::Result<()> {
    sqlx::query(SQL_REFRESH_HAS_PETS)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}
