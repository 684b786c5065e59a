use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::friendship_repo::FriendRow;
use crate::error::ServiceError;
use crate::models::FriendshipRow;
use crate::services::friendship_service;
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct NewFriendshipBody {
    pub to_user_id: String,
}

pub async fn request_friendship_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Json(body): Json<NewFriendshipBody>,
) -> Result<Json<FriendshipRow>, ServiceError> {
    let friendship =
        friendship_service::request_friendship(&pool, &auth_user.id, &body.to_user_id).await?;
    Ok(Json(friendship))
}

#[derive(Debug, Deserialize)]
pub struct ListRequestsQuery {
    pub direction: Option<String>,
}

/// GET /api/friendships?direction=incoming|outgoing — pending requests.
pub async fn list_requests_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Query(query): Query<ListRequestsQuery>,
) -> Result<Json<Vec<FriendshipRow>>, ServiceError> {
    let rows = match query.direction.as_deref().unwrap_or("incoming") {
        "incoming" => friendship_service::list_incoming_requests(&pool, &auth_user.id).await?,
        "outgoing" => friendship_service::list_outgoing_requests(&pool, &auth_user.id).await?,
        other => {
            return Err(ServiceError::Validation(format!(
                "unknown direction '{}'",
                other
            )))
        }
    };
    Ok(Json(rows))
}

pub async fn accept_friendship_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(friendship_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<FriendshipRow>, ServiceError> {
    let friendship =
        friendship_service::accept_friendship(&pool, &friendship_id, &auth_user.id).await?;
    Ok(Json(friendship))
}

pub async fn reject_friendship_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(friendship_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<FriendshipRow>, ServiceError> {
    let friendship =
        friendship_service::reject_friendship(&pool, &friendship_id, &auth_user.id).await?;
    Ok(Json(friendship))
}

pub async fn remove_friendship_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(friendship_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<StatusCode, ServiceError> {
    friendship_service::remove_friendship(&pool, &friendship_id, &auth_user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/friends — accepted friendships, either direction.
pub async fn list_friends_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<FriendRow>>, ServiceError> {
    let friends = friendship_service::list_friends(&pool, &auth_user.id).await?;
    Ok(Json(friends))
}
