use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::ServiceError;
use crate::models::PetTransferRow;
use crate::services::pet_transfer_service;
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct ListTransfersQuery {
    pub direction: Option<String>,
}

/// GET /api/pet-transfers?direction=incoming|outgoing
pub async fn list_transfers_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Query(query): Query<ListTransfersQuery>,
) -> Result<Json<Vec<PetTransferRow>>, ServiceError> {
    let rows = match query.direction.as_deref().unwrap_or("incoming") {
        "incoming" => pet_transfer_service::list_incoming(&pool, &auth_user.id).await?,
        "outgoing" => pet_transfer_service::list_outgoing(&pool, &auth_user.id).await?,
        other => {
            return Err(ServiceError::Validation(format!(
                "unknown direction '{}'",
                other
            )))
        }
    };
    Ok(Json(rows))
}

pub async fn approve_transfer_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(transfer_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<PetTransferRow>, ServiceError> {
    let transfer =
        pet_transfer_service::approve_transfer(&pool, &transfer_id, &auth_user.id).await?;
    Ok(Json(transfer))
}

pub async fn reject_transfer_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(transfer_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<PetTransferRow>, ServiceError> {
    let transfer =
        pet_transfer_service::reject_transfer(&pool, &transfer_id, &auth_user.id).await?;
    Ok(Json(transfer))
}

pub async fn cancel_transfer_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(transfer_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<PetTransferRow>, ServiceError> {
    let transfer =
        pet_transfer_service::cancel_transfer(&pool, &transfer_id, &auth_user.id).await?;
    Ok(Json(transfer))
}
