//! Suggestions domain - AI-assisted buddy ranking for newcomers

pub mod activities;
pub mod data;
pub mod errors;
pub mod parse;
pub mod prompt;
pub mod ranker;

pub use data::{AiStatus, SuggestRequest, Suggestion, SuggestionResult};
pub use errors::SuggestionError;
pub use ranker::SuggestionRanker;
