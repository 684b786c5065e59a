#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about_me: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub profile_picture_url: Option<String>,
    pub preferred_language: Option<String>,
    pub profile_visibility: Option<String>,
    pub has_pets: Option<i64>,
    pub profile_incomplete: Option<i64>,
    pub num_friends: Option<i64>,
    pub created_at: String,
}

// Search result row (users + computed distance when a geo filter is active).
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct UserSearchRow {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub profile_picture_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[sqlx(skip)]
    pub distance_mi: Option<f64>,
}
