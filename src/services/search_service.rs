use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::{pet_repo, user_repo};
use crate::error::ServiceResult;
use crate::models::{PetSearchRow, UserSearchRow};

#[derive(Debug, Deserialize, Default)]
pub struct UserSearchQuery {
    pub q: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_mi: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PetSearchQuery {
    pub pet_id: Option<String>,
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_mi: Option<f64>,
}

/// Text + proximity search over users. The geo filter only activates when
/// origin and radius are all present; users without a stored coordinate
/// drop out of geo-filtered results at the bounding-box stage.
pub async fn search_users(
    pool: &SqlitePool,
    query: &UserSearchQuery,
) -> ServiceResult<Vec<UserSearchRow>> {
    let text = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let origin = geo_origin(query.lat, query.lon, query.radius_mi);

    let bbox = origin.map(|(lat, lon, radius)| bounding_box(lat, lon, radius));
    let rows = user_repo::search_user_candidates(pool, text, bbox).await?;

    let mut users = Vec::new();
    for mut user in rows {
        if let Some((lat0, lon0, radius)) = origin {
            let (Some(lat1), Some(lon1)) = (user.latitude, user.longitude) else {
                continue;
            };
            let dist = haversine_mi(lat0, lon0, lat1, lon1);
            if dist > radius {
                continue;
            }
            user.distance_mi = Some(dist);
        }
        users.push(user);
    }

    if origin.is_some() {
        users.sort_by(|a, b| {
            a.distance_mi
                .unwrap_or(f64::MAX)
                .partial_cmp(&b.distance_mi.unwrap_or(f64::MAX))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    } else {
        users.sort_by(|a, b| a.username.to_lowercase().cmp(&b.username.to_lowercase()));
    }
    Ok(users)
}

/// Pet search; the distance filter runs against the owner's coordinate.
pub async fn search_pets(
    pool: &SqlitePool,
    query: &PetSearchQuery,
) -> ServiceResult<Vec<PetSearchRow>> {
    let params = pet_repo::PetSearchParams {
        pet_id: query
            .pet_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
        name: query
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
        breed: query
            .breed
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
        age: query.age,
    };
    let origin = geo_origin(query.lat, query.lon, query.radius_mi);

    let bbox = origin.map(|(lat, lon, radius)| bounding_box(lat, lon, radius));
    let rows = pet_repo::search_pet_candidates(pool, params, bbox).await?;

    let mut pets = Vec::new();
    for mut pet in rows {
        if let Some((lat0, lon0, radius)) = origin {
            let (Some(lat1), Some(lon1)) = (pet.owner_latitude, pet.owner_longitude) else {
                continue;
            };
            let dist = haversine_mi(lat0, lon0, lat1, lon1);
            if dist > radius {
                continue;
            }
            pet.distance_mi = Some(dist);
        }
        pets.push(pet);
    }

    if origin.is_some() {
        pets.sort_by(|a, b| {
            a.distance_mi
                .unwrap_or(f64::MAX)
                .partial_cmp(&b.distance_mi.unwrap_or(f64::MAX))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    } else {
        pets.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    }
    Ok(pets)
}

fn geo_origin(
    lat: Option<f64>,
    lon: Option<f64>,
    radius_mi: Option<f64>,
) -> Option<(f64, f64, f64)> {
    match (lat, lon, radius_mi) {
        (Some(lat), Some(lon), Some(radius)) if radius > 0.0 => Some((lat, lon, radius)),
        _ => None,
    }
}

pub fn haversine_mi(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let to_rad = |deg: f64| deg.to_radians();
    let dlat = to_rad(lat2 - lat1);
    let dlon = to_rad(lon2 - lon1);
    let a = (dlat / 2.0).sin().powi(2)
        + to_rad(lat1).cos() * to_rad(lat2).cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    3958.8 * c
}

fn bounding_box(lat: f64, lon: f64, radius_mi: f64) -> (f64, f64, f64, f64) {
    // ~69 miles per degree of latitude; longitude shrinks with latitude.
    let lat_change = radius_mi / 69.0;
    let lat_rad = lat.to_radians();
    let lon_change = (radius_mi / 69.0) / lat_rad.cos().abs();

    (
        lat - lat_change,
        lat + lat_change,
        lon - lon_change,
        lon + lon_change,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_sf_to_daly_city() {
        // San Francisco to Daly City, roughly 8.6 miles.
        let d = haversine_mi(37.7749, -122.4194, 37.6879, -122.4702);
        assert!((8.0..9.5).contains(&d), "got {}", d);
    }

    #[test]
    fn haversine_sf_to_sacramento() {
        // Well outside any 10 mile radius.
        let d = haversine_mi(37.7749, -122.4194, 38.5816, -121.4944);
        assert!(d > 80.0, "got {}", d);
    }

    #[test]
    fn geo_origin_requires_all_parts() {
        assert!(geo_origin(Some(1.0), Some(2.0), Some(5.0)).is_some());
        assert!(geo_origin(Some(1.0), Some(2.0), None).is_none());
        assert!(geo_origin(Some(1.0), None, Some(5.0)).is_none());
        assert!(geo_origin(None, Some(2.0), Some(5.0)).is_none());
        assert!(geo_origin(Some(1.0), Some(2.0), Some(0.0)).is_none());
    }

    #[test]
    fn bounding_box_contains_origin() {
        let (min_lat, max_lat, min_lon, max_lon) = bounding_box(37.7749, -122.4194, 10.0);
        assert!(min_lat < 37.7749 && 37.7749 < max_lat);
        assert!(min_lon < -122.4194 && -122.4194 < max_lon);
    }
}
