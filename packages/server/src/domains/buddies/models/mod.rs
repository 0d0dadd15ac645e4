pub mod buddy_profile;

pub use buddy_profile::{BuddyProfile, BuddyWithUser, CreateBuddyProfile};
