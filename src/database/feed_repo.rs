use sqlx::SqlitePool;

use crate::models::FeedPostRow;

// Three independent inclusion clauses, one per visibility rule. UNION
// removes the overlap (a viewer's own public post matches twice), the
// outer query joins author info and child counts, newest first.
const SQL_LOAD_FEED: &str = r#"
SELECT
  p.post_id,
  p.user_id,
  u.username AS author_username,
  u.display_name AS author_display_name,
  p.content,
  p.visibility,
  p.photo_url,
  p.timestamp,
  (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.post_id) AS like_count,
  (SELECT COUNT(*) FROM comments c
    WHERE c.post_id = p.post_id AND c.is_active = 1) AS comment_count
FROM posts p
JOIN users u ON u.user_id = p.user_id
WHERE p.post_id IN (
  SELECT post_id FROM posts
  WHERE is_active = 1 AND user_id = ?1

  UNION

  SELECT post_id FROM posts
  WHERE is_active = 1 AND visibility = 'public'

  UNION

  SELECT post_id FROM posts
  WHERE is_active = 1
    AND visibility = 'friends_only'
    AND EXISTS (
      SELECT 1 FROM friendships f
      WHERE f.status = 'accepted'
        AND ((f.from_user_id = ?1 AND f.to_user_id = posts.user_id)
          OR (f.to_user_id = ?1 AND f.from_user_id = posts.user_id))
    )
)
ORDER BY p.timestamp DESC, p.post_id DESC
LIMIT ?2 OFFSET ?3
"#;

pub async fn load_feed(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<FeedPostRow>> {
    sqlx::query_as::<_, FeedPostRow>(SQL_LOAD_FEED)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}
