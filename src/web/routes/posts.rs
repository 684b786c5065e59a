use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::ServiceError;
use crate::models::CommentRow;
use crate::services::post_service::{self, NewPostRequest, PostView};
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn create_post_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Json(body): Json<NewPostRequest>,
) -> Result<Json<PostView>, ServiceError> {
    let post = post_service::create_post(&pool, &auth_user.id, body).await?;
    Ok(Json(post))
}

pub async fn get_post_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<PostView>, ServiceError> {
    let post = post_service::load_post(&pool, Some(&auth_user.id), &post_id).await?;
    Ok(Json(post))
}

pub async fn delete_post_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<StatusCode, ServiceError> {
    post_service::delete_post(&pool, &post_id, &auth_user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct NewCommentBody {
    pub content: String,
}

pub async fn list_comments_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<CommentRow>>, ServiceError> {
    let comments = post_service::list_comments(&pool, Some(&auth_user.id), &post_id).await?;
    Ok(Json(comments))
}

pub async fn add_comment_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<NewCommentBody>,
) -> Result<Json<Vec<CommentRow>>, ServiceError> {
    let comments = post_service::add_comment(&pool, &auth_user.id, &post_id, &body.content).await?;
    Ok(Json(comments))
}

pub async fn like_post_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<StatusCode, ServiceError> {
    post_service::like_post(&pool, &auth_user.id, &post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unlike_post_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(post_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<StatusCode, ServiceError> {
    post_service::unlike_post(&pool, &auth_user.id, &post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
