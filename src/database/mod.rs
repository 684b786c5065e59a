pub mod feed_repo;
pub mod friendship_repo;
pub mod pet_repo;
pub mod pet_transfer_repo;
pub mod post_repo;
pub mod schema;
pub mod user_repo;
