//! Users domain - identities, roles and descriptive profiles

pub mod models;

pub use models::{CreateUser, Profile, UpsertProfile, User};
