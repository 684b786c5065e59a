mod common;

use pawsconnect::services::pet_service::{self, NewPetRequest};
use pawsconnect::services::search_service::{self, PetSearchQuery, UserSearchQuery};

use common::{create_user, create_user_at, test_pool};

fn sf_query(radius_mi: f64) -> UserSearchQuery {
    UserSearchQuery {
        q: None,
        lat: Some(37.7749),
        lon: Some(-122.4194),
        radius_mi: Some(radius_mi),
    }
}

#[tokio::test]
async fn radius_search_includes_near_and_excludes_far() {
    let pool = test_pool().await;
    // ~8.6 miles from the origin.
    create_user_at(&pool, "near", "daly_city_dogs", 37.6879, -122.4702).await;
    // ~87 miles from the origin.
    create_user_at(&pool, "far", "sacramento_cats", 38.5816, -121.4944).await;

    let results = search_service::search_users(&pool, &sf_query(10.0))
        .await
        .unwrap();
    let ids: Vec<&str> = results.iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(ids, vec!["near"]);

    let near = &results[0];
    let dist = near.distance_mi.expect("distance set under geo filter");
    assert!((8.0..9.5).contains(&dist), "got {}", dist);
}

#[tokio::test]
async fn user_without_coordinate_never_matches_radius_filter() {
    let pool = test_pool().await;
    create_user(&pool, "nowhere", "nowhere_man").await;

    // Even a perfect text match stays out while a radius is active.
    let mut query = sf_query(10.0);
    query.q = Some("nowhere".to_string());
    let geo_results = search_service::search_users(&pool, &query).await.unwrap();
    assert!(geo_results.is_empty());

    // Without the geo filter the same text query finds the user.
    let text_only = UserSearchQuery {
        q: Some("nowhere".to_string()),
        ..Default::default()
    };
    let results = search_service::search_users(&pool, &text_only).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].user_id, "nowhere");
    assert!(results[0].distance_mi.is_none());
}

#[tokio::test]
async fn text_filter_is_case_insensitive_substring() {
    let pool = test_pool().await;
    create_user(&pool, "u1", "PawsitiveVibes").await;
    create_user(&pool, "u2", "grumpycat").await;

    let query = UserSearchQuery {
        q: Some("pawsitive".to_string()),
        ..Default::default()
    };
    let results = search_service::search_users(&pool, &query).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].user_id, "u1");

    // No filters at all returns everyone.
    let all = search_service::search_users(&pool, &UserSearchQuery::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn text_and_geo_filters_combine_as_and() {
    let pool = test_pool().await;
    create_user_at(&pool, "near_match", "rex_sf", 37.6879, -122.4702).await;
    create_user_at(&pool, "near_other", "whiskers_sf", 37.6879, -122.4702).await;
    create_user_at(&pool, "far_match", "rex_sac", 38.5816, -121.4944).await;

    let mut query = sf_query(10.0);
    query.q = Some("rex".to_string());
    let results = search_service::search_users(&pool, &query).await.unwrap();
    let ids: Vec<&str> = results.iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(ids, vec!["near_match"]);
}

#[tokio::test]
async fn pet_search_filters_by_name_and_owner_location() {
    let pool = test_pool().await;
    create_user_at(&pool, "near", "near_owner", 37.6879, -122.4702).await;
    create_user_at(&pool, "far", "far_owner", 38.5816, -121.4944).await;
    create_user(&pool, "nowhere", "nowhere_owner").await;

    for (owner, pet_name) in [("near", "Rex"), ("far", "Rexine"), ("nowhere", "Rexford")] {
        pet_service::create_pet(
            &pool,
            owner,
            NewPetRequest {
                name: pet_name.to_string(),
                pet_type: "dog".to_string(),
                breed: Some("labrador".to_string()),
                color: None,
                age: Some(3),
                description: None,
                profile_picture_url: None,
            },
        )
        .await
        .unwrap();
    }

    // Name filter alone matches all three.
    let by_name = search_service::search_pets(
        &pool,
        &PetSearchQuery {
            name: Some("rex".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_name.len(), 3);

    // Adding a radius keeps only the pet whose owner is geocoded nearby.
    let nearby = search_service::search_pets(
        &pool,
        &PetSearchQuery {
            name: Some("rex".to_string()),
            lat: Some(37.7749),
            lon: Some(-122.4194),
            radius_mi: Some(10.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(nearby.len(), 1);
    assert_eq!(nearby[0].owner_id, "near");
    assert!(nearby[0].distance_mi.is_some());
}
