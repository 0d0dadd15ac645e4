pub mod feedback;

pub use feedback::{Feedback, FeedbackAverages, NewFeedback};
