//! Role-gated authorization
//!
//! The identity provider supplies a user id and role; this module answers
//! whether that role may attempt an operation:
//!
//! ```rust,ignore
//! use crate::common::auth::{Actor, Capability};
//!
//! Actor::new(user_id, role)
//!     .can(Capability::UseAiSuggestions)
//!     .check()?;
//! ```

mod builder;
mod capability;
mod errors;
mod role;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::Capability;
pub use errors::AuthError;
pub use role::Role;
