// HTTP routes
pub mod buddies;
pub mod feedback;
pub mod health;
pub mod matches;
pub mod notifications;
pub mod suggestions;

pub use health::*;
