use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{friendship_repo, pet_repo, post_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{CommentRow, PostRow, PostVisibility};
use crate::services::visibility_service;

#[derive(Debug, Deserialize)]
pub struct NewPostRequest {
    pub content: String,
    pub visibility: String,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub pet_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub visibility: String,
    pub photo_url: Option<String>,
    pub timestamp: String,
    pub tagged_pet_ids: Vec<String>,
}

async fn build_view(pool: &SqlitePool, post: PostRow) -> ServiceResult<PostView> {
    let tagged_pet_ids = post_repo::list_tagged_pet_ids(pool, &post.post_id).await?;
    Ok(PostView {
        post_id: post.post_id,
        user_id: post.user_id,
        content: post.content,
        visibility: post.visibility,
        photo_url: post.photo_url,
        timestamp: post.timestamp,
        tagged_pet_ids,
    })
}

/// Creates a post with its pet tags in one transaction. Tagged pets must
/// belong to the author.
pub async fn create_post(
    pool: &SqlitePool,
    author_id: &str,
    request: NewPostRequest,
) -> ServiceResult<PostView> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(ServiceError::Validation("post content is required".into()));
    }
    let visibility = PostVisibility::parse(&request.visibility)?;

    for pet_id in &request.pet_ids {
        let pet = pet_repo::load_pet(pool, pet_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        if pet.owner_id != author_id {
            return Err(ServiceError::Forbidden);
        }
    }

    let post_id = Uuid::new_v4().to_string();
    let mut tx = pool.begin().await?;
    post_repo::insert_post_tx(
        &mut tx,
        post_repo::NewPost {
            post_id: &post_id,
            user_id: author_id,
            content,
            visibility: visibility.as_str(),
            photo_url: request.photo_url.as_deref(),
        },
    )
    .await?;
    for pet_id in &request.pet_ids {
        post_repo::tag_pet_tx(&mut tx, &post_id, pet_id).await?;
    }
    tx.commit().await?;

    let post = post_repo::load_post(pool, &post_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    build_view(pool, post).await
}

/// Single-post fetch, gated by the visibility predicate. A post the
/// viewer may not see reads as Forbidden, not NotFound, matching the
/// listing endpoints.
pub async fn load_post(
    pool: &SqlitePool,
    viewer: Option<&str>,
    post_id: &str,
) -> ServiceResult<PostView> {
    let post = post_repo::load_post(pool, post_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if !visibility_service::can_view_post(pool, viewer, &post).await? {
        return Err(ServiceError::Forbidden);
    }
    build_view(pool, post).await
}

/// Owner-only soft delete.
pub async fn delete_post(pool: &SqlitePool, post_id: &str, actor_id: &str) -> ServiceResult<()> {
    let post = post_repo::load_post(pool, post_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if post.user_id != actor_id {
        return Err(ServiceError::Forbidden);
    }
    post_repo::soft_delete_post(pool, post_id).await?;
    Ok(())
}

/// A user's post list as seen by `viewer`. One friendship lookup covers
/// the whole list; the per-post check is then the pure predicate.
pub async fn list_user_posts(
    pool: &SqlitePool,
    viewer: Option<&str>,
    owner_id: &str,
) -> ServiceResult<Vec<PostView>> {
    let posts = post_repo::list_posts_by_user(pool, owner_id).await?;

    let accepted = match viewer {
        Some(viewer_id) if viewer_id != owner_id => {
            friendship_repo::has_accepted_friendship(pool, viewer_id, owner_id).await?
        }
        _ => false,
    };

    let mut views = Vec::new();
    for post in posts {
        let visibility = PostVisibility::parse(&post.visibility)?;
        if visibility_service::can_view(viewer, owner_id, visibility, accepted) {
            views.push(build_view(pool, post).await?);
        }
    }
    Ok(views)
}

/// Commenting requires seeing the parent post.
pub async fn add_comment(
    pool: &SqlitePool,
    actor_id: &str,
    post_id: &str,
    content: &str,
) -> ServiceResult<Vec<CommentRow>> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ServiceError::Validation("comment content is required".into()));
    }

    let post = post_repo::load_post(pool, post_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if !visibility_service::can_view_post(pool, Some(actor_id), &post).await? {
        return Err(ServiceError::Forbidden);
    }

    let comment_id = Uuid::new_v4().to_string();
    post_repo::insert_comment(pool, &comment_id, post_id, actor_id, content).await?;
    Ok(post_repo::list_comments(pool, post_id).await?)
}

pub async fn list_comments(
    pool: &SqlitePool,
    viewer: Option<&str>,
    post_id: &str,
) -> ServiceResult<Vec<CommentRow>> {
    let post = post_repo::load_post(pool, post_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if !visibility_service::can_view_post(pool, viewer, &post).await? {
        return Err(ServiceError::Forbidden);
    }
    Ok(post_repo::list_comments(pool, post_id).await?)
}

/// Idempotent like; re-liking an already-liked post is a no-op.
pub async fn like_post(pool: &SqlitePool, actor_id: &str, post_id: &str) -> ServiceResult<()> {
    let post = post_repo::load_post(pool, post_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if !visibility_service::can_view_post(pool, Some(actor_id), &post).await? {
        return Err(ServiceError::Forbidden);
    }

    let like_id = Uuid::new_v4().to_string();
    post_repo::insert_like(pool, &like_id, post_id, actor_id).await?;
    Ok(())
}

pub async fn unlike_post(pool: &SqlitePool, actor_id: &str, post_id: &str) -> ServiceResult<()> {
    post_repo::delete_like(pool, post_id, actor_id).await?;
    Ok(())
}
