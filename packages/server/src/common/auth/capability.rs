use super::Role;

/// Operations gated by role.
///
/// Ownership checks (e.g. "only the receiver may respond") are enforced by the
/// operation itself; capabilities only answer "may this role attempt it at all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Place a newcomer with a buddy (NEWCOMER_MATCH)
    CreateNewcomerMatch,

    /// Peer-to-peer requests (RELOCATION_SUPPORT, OFFICE_CONNECTION)
    CreatePeerMatch,

    /// Accept or reject an incoming request
    RespondToMatch,

    /// Buddy utilization dashboard
    ViewDashboard,

    /// AI suggestions, AI status and cache administration
    UseAiSuggestions,

    /// Aggregated feedback reporting
    ViewFeedbackStats,
}

impl Capability {
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Capability::CreateNewcomerMatch
            | Capability::ViewDashboard
            | Capability::UseAiSuggestions
            | Capability::ViewFeedbackStats => &[Role::Hr],
            Capability::CreatePeerMatch => &[Role::Hr, Role::Buddy],
            Capability::RespondToMatch => &[Role::Buddy],
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}
