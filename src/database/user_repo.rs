use sqlx::{sqlite::SqliteArguments, Arguments, SqlitePool};

use crate::models::{UserRow, UserSearchRow};

pub struct NewUser<'a> {
    pub user_id: &'a str,
    pub username: &'a str,
    pub display_name: &'a str,
    pub email: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub about_me: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub zip_code: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub profile_picture_url: Option<&'a str>,
    pub preferred_language: Option<&'a str>,
    pub profile_visibility: Option<&'a str>,
    pub has_pets: bool,
    pub profile_incomplete: bool,
}

const SQL_INSERT_USER: &str = r#"
INSERT INTO users (
  user_id,
  username,
  display_name,
  email,
  first_name,
  last_name,
  about_me,
  city,
  state,
  zip_code,
  latitude,
  longitude,
  profile_picture_url,
  preferred_language,
  profile_visibility,
  has_pets,
  profile_incomplete
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
          COALESCE(?14, 'en'), COALESCE(?15, 'public'), ?16, ?17)
"#;

pub async fn insert_user(pool: &SqlitePool, user: NewUser<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_USER)
        .bind(user.user_id)
        .bind(user.username)
        .bind(user.display_name)
        .bind(user.email)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.about_me)
        .bind(user.city)
        .bind(user.state)
        .bind(user.zip_code)
        .bind(user.latitude)
        .bind(user.longitude)
        .bind(user.profile_picture_url)
        .bind(user.preferred_language)
        .bind(user.profile_visibility)
        .bind(user.has_pets)
        .bind(user.profile_incomplete)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_LOAD_USER: &str = r#"
SELECT
  user_id,
  username,
  display_name,
  email,
  first_name,
  last_name,
  about_me,
  city,
  state,
  zip_code,
  latitude,
  longitude,
  profile_picture_url,
  preferred_language,
  profile_visibility,
  has_pets,
  profile_incomplete,
  num_friends,
  created_at
FROM users
WHERE user_id = ?1
  AND (is_deleted = 0 OR is_deleted IS NULL)
LIMIT 1
"#;

pub async fn load_user(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(SQL_LOAD_USER)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub struct ProfileUpdate<'a> {
    pub display_name: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub about_me: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub zip_code: Option<&'a str>,
    pub profile_picture_url: Option<&'a str>,
    pub preferred_language: Option<&'a str>,
    pub profile_visibility: Option<&'a str>,
}

const SQL_UPDATE_PROFILE: &str = r#"
UPDATE users
SET display_name = ?2,
    first_name = ?3,
    last_name = ?4,
    about_me = ?5,
    city = ?6,
    state = ?7,
    zip_code = ?8,
    profile_picture_url = ?9,
    preferred_language = COALESCE(?10, preferred_language),
    profile_visibility = COALESCE(?11, profile_visibility)
WHERE user_id = ?1
  AND (is_deleted = 0 OR is_deleted IS NULL)
"#;

pub async fn update_profile(
    pool: &SqlitePool,
    user_id: &str,
    update: ProfileUpdate<'_>,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_UPDATE_PROFILE)
        .bind(user_id)
        .bind(update.display_name)
        .bind(update.first_name)
        .bind(update.last_name)
        .bind(update.about_me)
        .bind(update.city)
        .bind(update.state)
        .bind(update.zip_code)
        .bind(update.profile_picture_url)
        .bind(update.preferred_language)
        .bind(update.profile_visibility)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

const SQL_UPDATE_USER_GEO: &str = r#"
UPDATE users
SET latitude = ?2, longitude = ?3
WHERE user_id = ?1
"#;

pub async fn update_user_geo(
    pool: &SqlitePool,
    user_id: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_UPDATE_USER_GEO)
        .bind(user_id)
        .bind(latitude)
        .bind(longitude)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

const SQL_SET_PROFILE_INCOMPLETE: &str = r#"
UPDATE users
SET profile_incomplete = ?2
WHERE user_id = ?1
"#;

pub async fn set_profile_incomplete(
    pool: &SqlitePool,
    user_id: &str,
    incomplete: bool,
) -> sqlx::Result<()> {
    sqlx::query(SQL_SET_PROFILE_INCOMPLETE)
        .bind(user_id)
        .bind(incomplete)
        .execute(pool)
        .await?;
    Ok(())
}

#[derive(Debug, sqlx::FromRow)]
pub struct UserGeoCandidateRow {
    pub user_id: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

const SQL_LIST_USERS_MISSING_GEO: &str = r#"
SELECT
  user_id,
  city,
  state,
  zip_code
FROM users
WHERE (is_deleted = 0 OR is_deleted IS NULL)
  AND (latitude IS NULL OR longitude IS NULL)
  AND city IS NOT NULL AND city != ''
  AND state IS NOT NULL AND state != ''
ORDER BY created_at ASC
LIMIT ?
"#;

pub async fn list_users_missing_geo(
    pool: &SqlitePool,
    limit: i64,
) -> sqlx::Result<Vec<UserGeoCandidateRow>> {
    sqlx::query_as::<_, UserGeoCandidateRow>(SQL_LIST_USERS_MISSING_GEO)
        .bind(limit)
        .fetch_all(pool)
        .await
}

const SQL_SEARCH_USERS_BASE: &str = r#"
SELECT
    u.user_id, u.username, u.display_name, u.city, u.state,
    u.profile_picture_url, u.latitude, u.longitude
FROM users u
WHERE (u.is_deleted = 0 OR u.is_deleted IS NULL)
"#;

// Candidate load for user search. The bounding box is a coarse prefilter;
// the exact great-circle cut happens in the service layer. A NULL coordinate
// never matches BETWEEN, so un-geocoded users drop out whenever a box is set.
pub async fn search_user_candidates(
    pool: &SqlitePool,
    text: Option<&str>,
    bbox: Option<(f64, f64, f64, f64)>,
) -> sqlx::Result<Vec<UserSearchRow>> {
    let mut sql = String::from(SQL_SEARCH_USERS_BASE);
    let mut args = SqliteArguments::default();

    if let Some(q) = text {
        sql.push_str(
            " AND (LOWER(u.username) LIKE '%' || LOWER(?) || '%' \
               OR LOWER(u.display_name) LIKE '%' || LOWER(?) || '%')",
        );
        args.add(q);
        args.add(q);
    }

    if let Some((min_lat, max_lat, min_lon, max_lon)) = bbox {
        sql.push_str(" AND u.latitude BETWEEN ? AND ? AND u.longitude BETWEEN ? AND ?");
        args.add(min_lat);
        args.add(max_lat);
        args.add(min_lon);
        args.add(max_lon);
    }

    sql.push_str(" LIMIT 500");

    sqlx::query_as_with::<_, UserSearchRow, _>(&sql, args)
        .fetch_all(pool)
        .await
}
