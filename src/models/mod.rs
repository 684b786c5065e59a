pub mod friendships;
pub mod pet_transfers;
pub mod pets;
pub mod posts;
pub mod users;

pub use friendships::{FriendshipRow, FriendshipStatus};
pub use pet_transfers::{PetTransferRow, TransferStatus};
pub use pets::{PetRow, PetSearchRow};
pub use posts::{CommentRow, FeedPostRow, PostRow, PostVisibility};
pub use users::{UserRow, UserSearchRow};
