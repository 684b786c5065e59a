use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::ServiceError;
use crate::models::{PetRow, PetTransferRow};
use crate::services::pet_service::{self, NewPetRequest};
use crate::services::pet_transfer_service;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn create_pet_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Json(body): Json<NewPetRequest>,
) -> Result<Json<PetRow>, ServiceError> {
    let pet = pet_service::create_pet(&pool, &auth_user.id, body).await?;
    Ok(Json(pet))
}

pub async fn get_pet_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(pet_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<PetRow>, ServiceError> {
    let pet = pet_service::load_pet(&pool, &pet_id).await?;
    Ok(Json(pet))
}

pub async fn update_pet_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(pet_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<NewPetRequest>,
) -> Result<Json<PetRow>, ServiceError> {
    let pet = pet_service::update_pet(&pool, &pet_id, &auth_user.id, body).await?;
    Ok(Json(pet))
}

pub async fn delete_pet_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(pet_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<StatusCode, ServiceError> {
    pet_service::delete_pet(&pool, &pet_id, &auth_user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct TransferRequestBody {
    pub to_user_id: String,
    pub message: Option<String>,
}

/// POST /api/pets/:pet_id/transfer — current owner offers the pet.
pub async fn request_transfer_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(pet_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<TransferRequestBody>,
) -> Result<Json<PetTransferRow>, ServiceError> {
    let transfer = pet_transfer_service::request_transfer(
        &pool,
        &pet_id,
        &auth_user.id,
        &body.to_user_id,
        body.message.as_deref(),
    )
    .await?;
    Ok(Json(transfer))
}
