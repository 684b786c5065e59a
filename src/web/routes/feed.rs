use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::error::ServiceError;
use crate::services::feed_service::{self, FeedQuery};
use crate::web::middleware::auth::AuthenticatedUser;

/// GET /api/feed?page=&page_size= — the viewer's visibility-scoped feed.
pub async fn feed_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Value>, ServiceError> {
    let page = feed_service::load_feed(&pool, &auth_user.id, &query).await?;
    Ok(Json(json!({
        "page": page.page,
        "page_size": page.page_size,
        "posts": page.posts,
    })))
}
