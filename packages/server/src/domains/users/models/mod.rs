pub mod profile;
pub mod user;

pub use profile::{Profile, UpsertProfile};
pub use user::{CreateUser, User};
