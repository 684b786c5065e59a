pub mod feed_service;
pub mod friendship_service;
pub mod geocoding_service;
pub mod pet_service;
pub mod pet_transfer_service;
pub mod post_service;
pub mod search_service;
pub mod user_geo_service;
pub mod user_service;
pub mod visibility_service;
