//! Feedback domain - post-match ratings and aggregate reporting

pub mod activities;
pub mod data;
pub mod errors;
pub mod models;

pub use data::{FeedbackStats, SubmitFeedbackInput};
pub use errors::FeedbackError;
pub use models::{Feedback, NewFeedback};
