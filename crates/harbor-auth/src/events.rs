use harbor_model::prelude::Permission;
use harbor_types::prelude::{ObjectId, SessionToken, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pdp::{Decision, GrantPath};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthDecisionEvent {
    pub user_id: UserId,
    pub resource_id: ObjectId,
    pub action: Option<Permission>,
    pub allow: bool,
    #[serde(default)]
    pub path: Option<GrantPath>,
    #[serde(default)]
    pub granting_party: Option<ObjectId>,
}

impl AuthDecisionEvent {
    pub fn new(token: &SessionToken, resource_id: &ObjectId, decision: &Decision) -> Self {
        Self {
            user_id: token.user_id.clone(),
            resource_id: resource_id.clone(),
            action: decision.permission,
            allow: decision.allow,
            path: decision.grant.as_ref().map(|g| g.path),
            granting_party: decision.grant.as_ref().map(|g| g.party_id.clone()),
        }
    }

    /// Denials are ordinary outcomes and are logged at the same level as grants.
    pub fn emit(&self) {
        debug!(
            user = %self.user_id,
            resource = %self.resource_id,
            action = ?self.action,
            allow = self.allow,
            path = ?self.path,
            party = ?self.granting_party,
            "authorization decision"
        );
    }
}
