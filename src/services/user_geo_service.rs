use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::info;
use tracing::warn;

use crate::database::user_repo;
use crate::services::geocoding_service;

#[derive(Debug, Default)]
pub struct UserGeoBackfillReport {
    pub candidates: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Re-geocodes users that have an address but no stored coordinate.
/// Identical addresses within one run hit the geocoder only once.
pub async fn backfill_user_geo(
    pool: &SqlitePool,
    limit: i64,
) -> sqlx::Result<UserGeoBackfillReport> {
    let candidates = user_repo::list_users_missing_geo(pool, limit).await?;
    let mut report = UserGeoBackfillReport {
        candidates: candidates.len(),
        ..Default::default()
    };

    let mut cache: HashMap<String, (f64, f64)> = HashMap::new();

    for row in candidates {
        let (Some(city), Some(state)) = (row.city.as_deref(), row.state.as_deref()) else {
            report.skipped += 1;
            continue;
        };
        let zip_code = row.zip_code.as_deref().unwrap_or("");

        let cache_key = format!("{}|{}|{}", city, state, zip_code).to_lowercase();
        let coords = match cache.get(&cache_key).copied() {
            Some(hit) => Some(hit),
            None => match geocoding_service::geocode(city, state, zip_code).await {
                Ok(coord) => {
                    let pair = (coord.latitude, coord.longitude);
                    cache.insert(cache_key, pair);
                    Some(pair)
                }
                Err(_) => None,
            },
        };

        let Some((lat, lon)) = coords else {
            warn!(
                "📍 No coords found for user {} ({}, {})",
                row.user_id, city, state
            );
            report.failed += 1;
            continue;
        };

        let updated = user_repo::update_user_geo(pool, &row.user_id, Some(lat), Some(lon)).await?;
        if updated > 0 {
            report.updated += 1;
        } else {
            report.failed += 1;
        }
    }

    info!(
        "📍 User geo backfill done: candidates={}, updated={}, skipped={}, failed={}",
        report.candidates, report.updated, report.skipped, report.failed
    );

    Ok(report)
}
