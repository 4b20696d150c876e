use shopledger_auth::PrincipalId;
use shopledger_core::OwnerId;

/// Owner context for a request.
///
/// This is immutable and must be present for all domain routes. Every
/// handler scopes its reads and writes to this owner; no handler ever takes
/// an owner id from the request body or path.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OwnerContext {
    owner_id: OwnerId,
}

impl OwnerContext {
    pub fn new(owner_id: OwnerId) -> Self {
        Self { owner_id }
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }
}

/// Principal context for a request (authenticated identity).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId) -> Self {
        Self { principal_id }
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }
}
