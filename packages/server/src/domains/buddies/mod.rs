//! Buddies domain - mentor profiles, capacity ledger and directory

pub mod activities;
pub mod data;
pub mod models;

pub use data::{BuddyDirectoryQuery, BuddyListing, CapacityData, DashboardEntry};
pub use models::{BuddyProfile, BuddyWithUser, CreateBuddyProfile};
