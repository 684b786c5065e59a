use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostVisibility {
    Public,
    FriendsOnly,
}

impl PostVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostVisibility::Public => "public",
            PostVisibility::FriendsOnly => "friends_only",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        match raw {
            "public" => Ok(PostVisibility::Public),
            "friends_only" => Ok(PostVisibility::FriendsOnly),
            other => Err(ServiceError::Validation(format!(
                "unknown visibility '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub visibility: String,
    pub photo_url: Option<String>,
    pub timestamp: String,
    pub is_active: i64,
}

// Feed/listing row with author info and child counts joined in.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct FeedPostRow {
    pub post_id: String,
    pub user_id: String,
    pub author_username: String,
    pub author_display_name: String,
    pub content: String,
    pub visibility: String,
    pub photo_url: Option<String>,
    pub timestamp: String,
    pub like_count: i64,
    pub comment_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct CommentRow {
    pub comment_id: String,
    pub post_id: String,
    pub user_id: String,
    pub author_username: String,
    pub content: String,
    pub timestamp: String,
}
