crate::text_enum! {
    /// User role carried in the identity token.
    ///
    /// Immutable after account creation; only used for authorization gating.
    pub enum Role {
        Hr => "HR",
        Buddy => "BUDDY",
        Newcomer => "NEWCOMER",
        RelocatingEmployee => "RELOCATING_EMPLOYEE",
        OfficeSeeker => "OFFICE_SEEKER",
    }
}

impl Role {
    /// HR-equivalent (elevated) authorization
    pub fn is_hr(&self) -> bool {
        matches!(self, Role::Hr)
    }
}
