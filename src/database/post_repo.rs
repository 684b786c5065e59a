use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{CommentRow, PostRow};

pub struct NewPost<'a> {
    pub post_id: &'a str,
    pub user_id: &'a str,
    pub content: &'a str,
    pub visibility: &'a str,
    pub photo_url: Option<&'a str>,
}

const SQL_INSERT_POST: &str = r#"
INSERT INTO posts (
  post_id,
  user_id,
  content,
  visibility,
  photo_url
) VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub async fn insert_post_tx(conn: &mut SqliteConnection, post: NewPost<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_POST)
        .bind(post.post_id)
        .bind(post.user_id)
        .bind(post.content)
        .bind(post.visibility)
        .bind(post.photo_url)
        .execute(conn)
        .await?;
    Ok(())
}

const SQL_TAG_PET: &str = r#"
INSERT OR IGNORE INTO post_pets (post_id, pet_id) VALUES (?1, ?2)
"#;

pub async fn tag_pet_tx(
    conn: &mut SqliteConnection,
    post_id: &str,
    pet_id: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_TAG_PET)
        .bind(post_id)
        .bind(pet_id)
        .execute(conn)
        .await?;
    Ok(())
}

const SQL_LOAD_POST: &str = r#"
SELECT
  post_id,
  user_id,
  content,
  visibility,
  photo_url,
  timestamp,
  is_active
FROM posts
WHERE post_id = ?1
  AND is_active = 1
LIMIT 1
"#;

pub async fn load_post(pool: &SqlitePool, post_id: &str) -> sqlx::Result<Option<PostRow>> {
    sqlx::query_as::<_, PostRow>(SQL_LOAD_POST)
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_TAGGED_PET_IDS: &str = r#"
SELECT pet_id FROM post_pets WHERE post_id = ?1 ORDER BY pet_id ASC
"#;

pub async fn list_tagged_pet_ids(pool: &SqlitePool, post_id: &str) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar(SQL_LIST_TAGGED_PET_IDS)
        .bind(post_id)
        .fetch_all(pool)
        .await
}

const SQL_LIST_POSTS_BY_USER: &str = r#"
SELECT
  post_id,
  user_id,
  content,
  visibility,
  photo_url,
  timestamp,
  is_active
FROM posts
WHERE user_id = ?1
  AND is_active = 1
ORDER BY timestamp DESC, post_id DESC
"#;

pub async fn list_posts_by_user(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Vec<PostRow>> {
    sqlx::query_as::<_, PostRow>(SQL_LIST_POSTS_BY_USER)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

const SQL_SOFT_DELETE_POST: &str = r#"
UPDATE posts
SET is_active = 0,
    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
WHERE post_id = ?1
  AND is_active = 1
"#;

pub async fn soft_delete_post(pool: &SqlitePool, post_id: &str) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_SOFT_DELETE_POST)
        .bind(post_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

const SQL_INSERT_COMMENT: &str = r#"
INSERT INTO comments (
  comment_id,
  post_id,
  user_id,
  content
) VALUES (?1, ?2, ?3, ?4)
"#;

pub async fn insert_comment(
    pool: &SqlitePool,
    comment_id: &str,
    post_id: &str,
    user_id: &str,
    content: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_COMMENT)
        .bind(comment_id)
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_LIST_COMMENTS: &str = r#"
SELECT
  c.comment_id,
  c.post_id,
  c.user_id,
  u.username AS author_username,
  c.content,
  c.timestamp
FROM comments c
JOIN users u ON u.user_id = c.user_id
WHERE c.post_id = ?1
  AND c.is_active = 1
ORDER BY c.timestamp ASC, c.comment_id ASC
"#;

pub async fn list_comments(pool: &SqlitePool, post_id: &str) -> sqlx::Result<Vec<CommentRow>> {
    sqlx::query_as::<_, CommentRow>(SQL_LIST_COMMENTS)
        .bind(post_id)
        .fetch_all(pool)
        .await
}

const SQL_INSERT_LIKE: &str = r#"
INSERT OR IGNORE INTO likes (like_id, post_id, user_id) VALUES (?1, ?2, ?3)
"#;

pub async fn insert_like(
    pool: &SqlitePool,
    like_id: &str,
    post_id: &str,
    user_id: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_LIKE)
        .bind(like_id)
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_DELETE_LIKE: &str = r#"
DELETE FROM likes WHERE post_id = ?1 AND user_id = ?2
"#;

pub async fn delete_like(pool: &SqlitePool, post_id: &str, user_id: &str) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_LIKE)
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
