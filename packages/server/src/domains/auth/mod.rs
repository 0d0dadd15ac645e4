//! Auth domain - identity token issuing and verification
//!
//! Credentials are checked by the external identity provider; this service
//! only signs and verifies the bearer token that carries user id and role.

pub mod jwt;

pub use jwt::{Claims, JwtService};
