// Business domains
pub mod auth;
pub mod buddies;
pub mod feedback;
pub mod matches;
pub mod notifications;
pub mod suggestions;
pub mod users;
