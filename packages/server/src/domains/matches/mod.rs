//! Matches domain - request, response and completion lifecycle

pub mod activities;
pub mod data;
pub mod errors;
pub mod models;

pub use data::{CreateMatchInput, ListMatchesQuery, MatchData, RespondInput};
pub use errors::{MatchError, NotFoundCause};
pub use models::{Match, MatchStatus, MatchType, NewMatch};
