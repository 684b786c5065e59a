use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::friendship_repo::{self, FriendRow};
use crate::database::user_repo;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{FriendshipRow, FriendshipStatus};

/// Creates a pending friendship request from `from_user_id` to
/// `to_user_id`. A pending or accepted record in the same direction
/// counts as a duplicate; a rejected record is replaced by a fresh
/// request (the unique constraint covers one row per direction).
pub async fn request_friendship(
    pool: &SqlitePool,
    from_user_id: &str,
    to_user_id: &str,
) -> ServiceResult<FriendshipRow> {
    if from_user_id == to_user_id {
        return Err(ServiceError::SelfRequest);
    }
    if user_repo::load_user(pool, to_user_id).await?.is_none() {
        return Err(ServiceError::NotFound);
    }

    if let Some(existing) = friendship_repo::find_directed(pool, from_user_id, to_user_id).await? {
        match FriendshipStatus::parse(&existing.status)? {
            FriendshipStatus::Pending | FriendshipStatus::Accepted => {
                return Err(ServiceError::DuplicateRequest);
            }
            FriendshipStatus::Rejected => {
                friendship_repo::delete_friendship(pool, &existing.friendship_id).await?;
            }
        }
    }

    let friendship_id = Uuid::new_v4().to_string();
    friendship_repo::insert_pending(pool, &friendship_id, from_user_id, to_user_id).await?;

    friendship_repo::load_friendship(pool, &friendship_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Recipient accepts a pending request. The whole transition runs in one
/// transaction; the guarded update makes a concurrent second accept see
/// zero affected rows and fail with InvalidState.
pub async fn accept_friendship(
    pool: &SqlitePool,
    friendship_id: &str,
    actor_id: &str,
) -> ServiceResult<FriendshipRow> {
    let mut tx = pool.begin().await?;

    let friendship = friendship_repo::load_friendship_tx(&mut tx, friendship_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if friendship.to_user_id != actor_id {
        return Err(ServiceError::Forbidden);
    }

    let affected = friendship_repo::transition_from_pending_tx(
        &mut tx,
        friendship_id,
        FriendshipStatus::Accepted.as_str(),
    )
    .await?;
    if affected == 0 {
        return Err(ServiceError::InvalidState);
    }

    friendship_repo::increment_num_friends_tx(&mut tx, &friendship.from_user_id).await?;
    friendship_repo::increment_num_friends_tx(&mut tx, &friendship.to_user_id).await?;

    tx.commit().await?;

    friendship_repo::load_friendship(pool, friendship_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Recipient rejects a pending request. Rejected is terminal; the row
/// stays around until either party deletes it.
pub async fn reject_friendship(
    pool: &SqlitePool,
    friendship_id: &str,
    actor_id: &str,
) -> ServiceResult<FriendshipRow> {
    let mut tx = pool.begin().await?;

    let friendship = friendship_repo::load_friendship_tx(&mut tx, friendship_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if friendship.to_user_id != actor_id {
        return Err(ServiceError::Forbidden);
    }

    let affected = friendship_repo::transition_from_pending_tx(
        &mut tx,
        friendship_id,
        FriendshipStatus::Rejected.as_str(),
    )
    .await?;
    if affected == 0 {
        return Err(ServiceError::InvalidState);
    }

    tx.commit().await?;

    friendship_repo::load_friendship(pool, friendship_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Either party can delete the edge, whatever its status.
pub async fn remove_friendship(
    pool: &SqlitePool,
    friendship_id: &str,
    actor_id: &str,
) -> ServiceResult<()> {
    let friendship = friendship_repo::load_friendship(pool, friendship_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if friendship.from_user_id != actor_id && friendship.to_user_id != actor_id {
        return Err(ServiceError::Forbidden);
    }

    friendship_repo::delete_friendship(pool, friendship_id).await?;
    Ok(())
}

pub async fn list_incoming_requests(
    pool: &SqlitePool,
    user_id: &str,
) -> ServiceResult<Vec<FriendshipRow>> {
    Ok(friendship_repo::list_pending_incoming(pool, user_id).await?)
}

pub async fn list_outgoing_requests(
    pool: &SqlitePool,
    user_id: &str,
) -> ServiceResult<Vec<FriendshipRow>> {
    Ok(friendship_repo::list_pending_outgoing(pool, user_id).await?)
}

/// Accepted friends in either direction, joined with their profile basics.
pub async fn list_friends(pool: &SqlitePool, user_id: &str) -> ServiceResult<Vec<FriendRow>> {
    Ok(friendship_repo::list_accepted_friends(pool, user_id).await?)
}
