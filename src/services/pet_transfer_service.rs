use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{pet_repo, pet_transfer_repo, user_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{PetTransferRow, TransferStatus};

/// Current owner offers a pet to another user. At most one pending
/// transfer can exist per pet.
pub async fn request_transfer(
    pool: &SqlitePool,
    pet_id: &str,
    actor_id: &str,
    to_user_id: &str,
    message: Option<&str>,
) -> ServiceResult<PetTransferRow> {
    let pet = pet_repo::load_pet(pool, pet_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if pet.owner_id != actor_id {
        return Err(ServiceError::Forbidden);
    }
    if to_user_id == actor_id {
        return Err(ServiceError::SelfRequest);
    }
    if user_repo::load_user(pool, to_user_id).await?.is_none() {
        return Err(ServiceError::NotFound);
    }
    if pet_transfer_repo::find_pending_for_pet(pool, pet_id)
        .await?
        .is_some()
    {
        return Err(ServiceError::DuplicateRequest);
    }

    let transfer_id = Uuid::new_v4().to_string();
    pet_transfer_repo::insert_pending(pool, &transfer_id, pet_id, actor_id, to_user_id, message)
        .await?;

    pet_transfer_repo::load_transfer(pool, &transfer_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Recipient approves: the status flip, the ownership reassignment and
/// both users' has_pets refresh commit as one unit. The guarded update
/// keeps a concurrent second approve from succeeding.
pub async fn approve_transfer(
    pool: &SqlitePool,
    transfer_id: &str,
    actor_id: &str,
) -> ServiceResult<PetTransferRow> {
    let mut tx = pool.begin().await?;

    let transfer = pet_transfer_repo::load_transfer_tx(&mut tx, transfer_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if transfer.to_user_id != actor_id {
        return Err(ServiceError::Forbidden);
    }

    let affected = pet_transfer_repo::transition_from_pending_tx(
        &mut tx,
        transfer_id,
        TransferStatus::Approved.as_str(),
    )
    .await?;
    if affected == 0 {
        return Err(ServiceError::InvalidState);
    }

    let reassigned =
        pet_transfer_repo::reassign_pet_owner_tx(&mut tx, &transfer.pet_id, &transfer.to_user_id)
            .await?;
    if reassigned == 0 {
        // Pet was soft-deleted after the request went out.
        return Err(ServiceError::InvalidState);
    }

    pet_transfer_repo::refresh_has_pets_tx(&mut tx, &transfer.from_user_id).await?;
    pet_transfer_repo::refresh_has_pets_tx(&mut tx, &transfer.to_user_id).await?;

    tx.commit().await?;

    pet_transfer_repo::load_transfer(pool, transfer_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Recipient declines the offer; ownership stays put.
pub async fn reject_transfer(
    pool: &SqlitePool,
    transfer_id: &str,
    actor_id: &str,
) -> ServiceResult<PetTransferRow> {
    transition_terminal(pool, transfer_id, actor_id, ActorRole::Recipient, TransferStatus::Rejected)
        .await
}

/// Sender withdraws a still-pending offer.
pub async fn cancel_transfer(
    pool: &SqlitePool,
    transfer_id: &str,
    actor_id: &str,
) -> ServiceResult<PetTransferRow> {
    transition_terminal(pool, transfer_id, actor_id, ActorRole::Sender, TransferStatus::Canceled)
        .await
}

enum ActorRole {
    Sender,
    Recipient,
}

async fn transition_terminal(
    pool: &SqlitePool,
    transfer_id: &str,
    actor_id: &str,
    role: ActorRole,
    new_status: TransferStatus,
) -> ServiceResult<PetTransferRow> {
    let mut tx = pool.begin().await?;

    let transfer = pet_transfer_repo::load_transfer_tx(&mut tx, transfer_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    let allowed = match role {
        ActorRole::Sender => transfer.from_user_id == actor_id,
        ActorRole::Recipient => transfer.to_user_id == actor_id,
    };
    if !allowed {
        return Err(ServiceError::Forbidden);
    }

    let affected =
        pet_transfer_repo::transition_from_pending_tx(&mut tx, transfer_id, new_status.as_str())
            .await?;
    if affected == 0 {
        return Err(ServiceError::InvalidState);
    }

    tx.commit().await?;

    pet_transfer_repo::load_transfer(pool, transfer_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn list_incoming(pool: &SqlitePool, user_id: &str) -> ServiceResult<Vec<PetTransferRow>> {
    Ok(pet_transfer_repo::list_incoming(pool, user_id).await?)
}

pub async fn list_outgoing(pool: &SqlitePool, user_id: &str) -> ServiceResult<Vec<PetTransferRow>> {
    Ok(pet_transfer_repo::list_outgoing(pool, user_id).await?)
}
