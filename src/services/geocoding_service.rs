use serde::Deserialize;
use tracing::warn;

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeHit>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<GeoLocation>,
}

#[derive(Debug, Deserialize)]
struct GeoLocation {
    lat: Option<f64>,
    lng: Option<f64>,
}

/// Resolves "city, state, zip" to a coordinate via the configured
/// geocoding API. Every failure path degrades to GeocodingUnavailable;
/// callers treat that as "keep the coordinate NULL".
pub async fn geocode(city: &str, state: &str, zip_code: &str) -> ServiceResult<Coordinate> {
    let base_url = std::env::var("GEOCODING_API_URL")
        .unwrap_or_else(|_| "https://maps.googleapis.com/maps/api/geocode/json".to_string());
    let Ok(api_key) = std::env::var("GEOCODING_API_KEY") else {
        warn!("📍 GEOCODING_API_KEY not configured, skipping geocode");
        return Err(ServiceError::GeocodingUnavailable);
    };

    let address = format!("{}, {}, {}", city.trim(), state.trim(), zip_code.trim());
    let client = reqwest::Client::new();

    let resp = match client
        .get(&base_url)
        .query(&[("address", address.as_str()), ("key", api_key.as_str())])
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            warn!("📍 Geocoding upstream unreachable: {}", e);
            return Err(ServiceError::GeocodingUnavailable);
        }
    };

    if !resp.status().is_success() {
        warn!("📍 Geocoding upstream non-OK: {}", resp.status());
        return Err(ServiceError::GeocodingUnavailable);
    }

    let parsed: GeocodeResponse = match resp.json().await {
        Ok(data) => data,
        Err(e) => {
            warn!("📍 Geocoding upstream JSON parse failed: {}", e);
            return Err(ServiceError::GeocodingUnavailable);
        }
    };

    parsed
        .results
        .unwrap_or_default()
        .into_iter()
        .find_map(|hit| {
            let location = hit.geometry?.location?;
            Some(Coordinate {
                latitude: location.lat?,
                longitude: location.lng?,
            })
        })
        .ok_or_else(|| {
            warn!("📍 Geocoding returned no usable result for '{}'", address);
            ServiceError::GeocodingUnavailable
        })
}

/// Best-effort variant for account writes: a failed geocode is logged
/// and the write goes on with no coordinate.
pub async fn geocode_best_effort(
    city: Option<&str>,
    state: Option<&str>,
    zip_code: Option<&str>,
) -> Option<Coordinate> {
    let (Some(city), Some(state), Some(zip_code)) = (city, state, zip_code) else {
        return None;
    };
    if city.trim().is_empty() || state.trim().is_empty() {
        return None;
    }

    match geocode(city, state, zip_code).await {
        Ok(coord) => Some(coord),
        Err(_) => None,
    }
}
