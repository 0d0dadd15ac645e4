//! Notifications domain - durable records of match transitions addressed to a user

pub mod activities;
pub mod models;

pub use models::{NewNotification, Notification, NotificationKind};
