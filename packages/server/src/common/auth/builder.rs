use tracing::debug;
use uuid::Uuid;

use super::{AuthError, Capability, Role};

/// Entry point for authorization checks
///
/// ```rust,ignore
/// Actor::new(user_id, role)
///     .can(Capability::CreateNewcomerMatch)
///     .check()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    user_id: Uuid,
    role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor: Actor,
    capability: Capability,
}

impl CapabilityBuilder {
    /// Perform the authorization check
    pub fn check(self) -> Result<Actor, AuthError> {
        if self.capability.allows(self.actor.role) {
            return Ok(self.actor);
        }

        debug!(
            user_id = %self.actor.user_id,
            role = %self.actor.role,
            capability = ?self.capability,
            "Permission denied"
        );
        Err(AuthError::PermissionDenied)
    }
}
