// Buddy Matching - API Core
//
// This crate provides the backend API HR uses to pair newcomers and
// relocating employees with volunteer buddy mentors.
// Architecture follows domain-driven design: models own persistence,
// activities own the business rules, the server layer maps HTTP onto them.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
