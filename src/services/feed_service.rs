use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::feed_repo;
use crate::error::ServiceResult;
use crate::models::FeedPostRow;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize, Default)]
pub struct FeedQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub struct FeedPage {
    pub page: i64,
    pub page_size: i64,
    pub posts: Vec<FeedPostRow>,
}

/// Visibility-scoped feed for `user_id`, newest first. The union of the
/// three inclusion clauses (own, public, friends-only-from-friends) and
/// the de-duplication both happen in the single feed query; this layer
/// only normalizes pagination.
pub async fn load_feed(
    pool: &SqlitePool,
    user_id: &str,
    query: &FeedQuery,
) -> ServiceResult<FeedPage> {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = clamp_page_size(query.page_size);
    let offset = (page - 1) * page_size;

    let posts = feed_repo::load_feed(pool, user_id, page_size, offset).await?;

    Ok(FeedPage {
        page,
        page_size,
        posts,
    })
}

pub fn clamp_page_size(requested: Option<i64>) -> i64 {
    match requested {
        Some(n) if n < 1 => DEFAULT_PAGE_SIZE,
        Some(n) => n.min(MAX_PAGE_SIZE),
        None => DEFAULT_PAGE_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_defaults_and_clamps() {
        assert_eq!(clamp_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_page_size(Some(0)), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_page_size(Some(-5)), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_page_size(Some(25)), 25);
        assert_eq!(clamp_page_size(Some(1000)), MAX_PAGE_SIZE);
    }
}
