use sqlx::SqlitePool;

use crate::database::friendship_repo;
use crate::error::ServiceResult;
use crate::models::{PostRow, PostVisibility};

/// Pure visibility predicate. `viewer` is `None` for anonymous callers.
/// `has_accepted_friendship` is the already-resolved accepted-friendship
/// fact between viewer and owner; it is only consulted for friends-only
/// posts.
pub fn can_view(
    viewer: Option<&str>,
    owner_id: &str,
    visibility: PostVisibility,
    has_accepted_friendship: bool,
) -> bool {
    match visibility {
        PostVisibility::Public => true,
        PostVisibility::FriendsOnly => match viewer {
            Some(viewer_id) => viewer_id == owner_id || has_accepted_friendship,
            None => false,
        },
    }
}

/// Predicate over a loaded post row. Does the single friendship lookup
/// only when the post is friends-only and the viewer is not the owner.
pub async fn can_view_post(
    pool: &SqlitePool,
    viewer: Option<&str>,
    post: &PostRow,
) -> ServiceResult<bool> {
    let visibility = PostVisibility::parse(&post.visibility)?;

    if visibility == PostVisibility::Public {
        return Ok(true);
    }

    let Some(viewer_id) = viewer else {
        return Ok(false);
    };
    if viewer_id == post.user_id {
        return Ok(true);
    }

    let accepted = friendship_repo::has_accepted_friendship(pool, viewer_id, &post.user_id).await?;
    Ok(can_view(viewer, &post.user_id, visibility, accepted))
}
