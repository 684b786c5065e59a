use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

use crate::database::user_repo;
use crate::error::{ServiceError, ServiceResult};
use crate::models::UserRow;
use crate::services::geocoding_service;
use crate::services::pet_service::{self, NewPetRequest};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about_me: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub profile_picture_url: Option<String>,
    pub preferred_language: Option<String>,
    pub profile_visibility: Option<String>,
    #[serde(default)]
    pub pets: Vec<NewPetRequest>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about_me: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub profile_picture_url: Option<String>,
    pub preferred_language: Option<String>,
    pub profile_visibility: Option<String>,
}

/// Profile as served to API consumers. Email stays internal.
#[derive(Debug, Serialize)]
pub struct UserProfileView {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about_me: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub profile_picture_url: Option<String>,
    pub preferred_language: String,
    pub profile_visibility: String,
    pub has_pets: bool,
    pub profile_incomplete: bool,
    pub num_friends: i64,
    pub created_at: String,
}

impl UserProfileView {
    pub fn from_row(row: UserRow) -> Self {
        UserProfileView {
            user_id: row.user_id,
            username: row.username,
            display_name: row.display_name,
            first_name: row.first_name,
            last_name: row.last_name,
            about_me: row.about_me,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            latitude: row.latitude,
            longitude: row.longitude,
            profile_picture_url: row.profile_picture_url,
            preferred_language: row.preferred_language.unwrap_or_else(|| "en".to_string()),
            profile_visibility: row.profile_visibility.unwrap_or_else(|| "public".to_string()),
            has_pets: row.has_pets.unwrap_or(0) == 1,
            profile_incomplete: row.profile_incomplete.unwrap_or(0) == 1,
            num_friends: row.num_friends.unwrap_or(0),
            created_at: row.created_at,
        }
    }
}

/// Registration, optionally with the user's initial pets in the same
/// call. Geocoding runs best-effort; a failure leaves the coordinate
/// NULL and the account write goes through regardless.
pub async fn register_user(
    pool: &SqlitePool,
    request: RegisterRequest,
) -> ServiceResult<UserProfileView> {
    let username = request.username.trim();
    let email = request.email.trim();
    if username.is_empty() {
        return Err(ServiceError::Validation("username is required".into()));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(ServiceError::Validation("a valid email is required".into()));
    }
    let display_name = {
        let trimmed = request.display_name.trim();
        if trimmed.is_empty() {
            username
        } else {
            trimmed
        }
    };

    let coordinate = geocoding_service::geocode_best_effort(
        request.city.as_deref(),
        request.state.as_deref(),
        request.zip_code.as_deref(),
    )
    .await;
    if coordinate.is_none() && request.city.is_some() {
        warn!("📍 No coordinate for new user '{}', stored without one", username);
    }

    let has_pets = !request.pets.is_empty();
    let incomplete = is_profile_incomplete(
        request.first_name.as_deref(),
        request.last_name.as_deref(),
        request.city.as_deref(),
        request.state.as_deref(),
        request.zip_code.as_deref(),
        request.profile_picture_url.as_deref(),
        has_pets,
    );

    let user_id = Uuid::new_v4().to_string();
    let insert = user_repo::insert_user(
        pool,
        user_repo::NewUser {
            user_id: &user_id,
            username,
            display_name,
            email,
            first_name: request.first_name.as_deref(),
            last_name: request.last_name.as_deref(),
            about_me: request.about_me.as_deref(),
            city: request.city.as_deref(),
            state: request.state.as_deref(),
            zip_code: request.zip_code.as_deref(),
            latitude: coordinate.map(|c| c.latitude),
            longitude: coordinate.map(|c| c.longitude),
            profile_picture_url: request.profile_picture_url.as_deref(),
            preferred_language: request.preferred_language.as_deref(),
            profile_visibility: request.profile_visibility.as_deref(),
            has_pets,
            profile_incomplete: incomplete,
        },
    )
    .await;

    match insert {
        Ok(()) => {}
        Err(sqlx::Error::Database(db)) if db.kind() == sqlx::error::ErrorKind::UniqueViolation => {
            return Err(ServiceError::Validation(
                "username or email already in use".into(),
            ));
        }
        Err(e) => return Err(e.into()),
    }

    for pet in request.pets {
        pet_service::create_pet(pool, &user_id, pet).await?;
    }

    let row = user_repo::load_user(pool, &user_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    Ok(UserProfileView::from_row(row))
}

pub async fn load_profile(pool: &SqlitePool, user_id: &str) -> ServiceResult<UserProfileView> {
    let row = user_repo::load_user(pool, user_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    Ok(UserProfileView::from_row(row))
}

/// Owner-only profile update. An address change re-triggers best-effort
/// geocoding; profile completeness is recomputed on every update.
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: &str,
    actor_id: &str,
    request: UpdateProfileRequest,
) -> ServiceResult<UserProfileView> {
    if user_id != actor_id {
        return Err(ServiceError::Forbidden);
    }
    let existing = user_repo::load_user(pool, user_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let display_name = request.display_name.trim();
    if display_name.is_empty() {
        return Err(ServiceError::Validation("display_name is required".into()));
    }

    user_repo::update_profile(
        pool,
        user_id,
        user_repo::ProfileUpdate {
            display_name,
            first_name: request.first_name.as_deref(),
            last_name: request.last_name.as_deref(),
            about_me: request.about_me.as_deref(),
            city: request.city.as_deref(),
            state: request.state.as_deref(),
            zip_code: request.zip_code.as_deref(),
            profile_picture_url: request.profile_picture_url.as_deref(),
            preferred_language: request.preferred_language.as_deref(),
            profile_visibility: request.profile_visibility.as_deref(),
        },
    )
    .await?;

    let address_changed = existing.city.as_deref() != request.city.as_deref()
        || existing.state.as_deref() != request.state.as_deref()
        || existing.zip_code.as_deref() != request.zip_code.as_deref();
    if address_changed {
        let coordinate = geocoding_service::geocode_best_effort(
            request.city.as_deref(),
            request.state.as_deref(),
            request.zip_code.as_deref(),
        )
        .await;
        user_repo::update_user_geo(
            pool,
            user_id,
            coordinate.map(|c| c.latitude),
            coordinate.map(|c| c.longitude),
        )
        .await?;
    }

    let row = user_repo::load_user(pool, user_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    let incomplete = is_profile_incomplete(
        row.first_name.as_deref(),
        row.last_name.as_deref(),
        row.city.as_deref(),
        row.state.as_deref(),
        row.zip_code.as_deref(),
        row.profile_picture_url.as_deref(),
        row.has_pets.unwrap_or(0) == 1,
    );
    if incomplete != (row.profile_incomplete.unwrap_or(0) == 1) {
        user_repo::set_profile_incomplete(pool, user_id, incomplete).await?;
    }

    let row = user_repo::load_user(pool, user_id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    Ok(UserProfileView::from_row(row))
}

/// Complete means: name, address, picture and the has_pets answer are
/// all filled in.
pub fn is_profile_incomplete(
    first_name: Option<&str>,
    last_name: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
    zip_code: Option<&str>,
    profile_picture_url: Option<&str>,
    has_pets: bool,
) -> bool {
    let filled = |v: Option<&str>| v.map(str::trim).is_some_and(|s| !s.is_empty());

    !(filled(first_name)
        && filled(last_name)
        && filled(city)
        && filled(state)
        && filled(zip_code)
        && filled(profile_picture_url)
        && has_pets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_profile_needs_every_required_field() {
        assert!(!is_profile_incomplete(
            Some("Jane"),
            Some("Doe"),
            Some("San Francisco"),
            Some("CA"),
            Some("94103"),
            Some("https://img/jane.png"),
            true,
        ));
    }

    #[test]
    fn missing_field_marks_profile_incomplete() {
        assert!(is_profile_incomplete(
            None,
            Some("Doe"),
            Some("San Francisco"),
            Some("CA"),
            Some("94103"),
            Some("https://img/jane.png"),
            true,
        ));
        assert!(is_profile_incomplete(
            Some("Jane"),
            Some("Doe"),
            Some(" "),
            Some("CA"),
            Some("94103"),
            Some("https://img/jane.png"),
            true,
        ));
        assert!(is_profile_incomplete(
            Some("Jane"),
            Some("Doe"),
            Some("San Francisco"),
            Some("CA"),
            Some("94103"),
            Some("https://img/jane.png"),
            false,
        ));
    }
}
