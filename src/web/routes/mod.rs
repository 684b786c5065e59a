pub mod feed;
pub mod friendships;
pub mod pet_transfers;
pub mod pets;
pub mod posts;
pub mod search;
pub mod users;
