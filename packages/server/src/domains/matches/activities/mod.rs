//! Match lifecycle activities
//!
//! The only code that writes `matches.status`.

mod complete;
mod create;
mod queries;
mod respond;

pub use complete::complete_match;
pub use create::create_match;
pub use queries::{get_match, list_matches, with_participants};
pub use respond::respond_to_match;
