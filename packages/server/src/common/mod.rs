// Common types and utilities shared across the application

pub mod auth;
pub mod text_enum;
pub mod types;

pub use auth::{Actor, AuthError, Capability, Role};
pub use types::*;
