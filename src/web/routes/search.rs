use axum::{
    extract::{Query, State},
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::error::ServiceError;
use crate::models::{PetSearchRow, UserSearchRow};
use crate::services::search_service::{self, PetSearchQuery, UserSearchQuery};
use crate::web::middleware::auth::AuthenticatedUser;

/// GET /api/search/users?q=&lat=&lon=&radius_mi=
pub async fn search_users_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<Vec<UserSearchRow>>, ServiceError> {
    let users = search_service::search_users(&pool, &query).await?;
    Ok(Json(users))
}

/// GET /api/search/pets?pet_id=&name=&breed=&age=&lat=&lon=&radius_mi=
pub async fn search_pets_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Query(query): Query<PetSearchQuery>,
) -> Result<Json<Vec<PetSearchRow>>, ServiceError> {
    let pets = search_service::search_pets(&pool, &query).await?;
    Ok(Json(pets))
}
