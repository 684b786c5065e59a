use axum::{
    extract::{Path, State},
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::error::ServiceError;
use crate::models::PetRow;
use crate::services::pet_service;
use crate::services::post_service::{self, PostView};
use crate::services::user_service::{
    self, RegisterRequest, UpdateProfileRequest, UserProfileView,
};
use crate::web::middleware::auth::AuthenticatedUser;

/// POST /api/users — open registration, the one unauthenticated write.
pub async fn register_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<UserProfileView>, ServiceError> {
    let view = user_service::register_user(&pool, body).await?;
    Ok(Json(view))
}

pub async fn get_user_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<UserProfileView>, ServiceError> {
    let view = user_service::load_profile(&pool, &user_id).await?;
    Ok(Json(view))
}

pub async fn update_user_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfileView>, ServiceError> {
    let view = user_service::update_profile(&pool, &user_id, &auth_user.id, body).await?;
    Ok(Json(view))
}

pub async fn user_pets_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<PetRow>>, ServiceError> {
    let pets = pet_service::list_pets(&pool, &user_id).await?;
    Ok(Json(pets))
}

/// The caller sees only the subset of this user's posts the visibility
/// rules allow.
pub async fn user_posts_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<PostView>>, ServiceError> {
    let posts = post_service::list_user_posts(&pool, Some(&auth_user.id), &user_id).await?;
    Ok(Json(posts))
}
