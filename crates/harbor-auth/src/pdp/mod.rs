use async_trait::async_trait;
use harbor_model::prelude::{Permission, PermissionMask};
use harbor_types::prelude::{ObjectId, SessionToken};
use serde::{Deserialize, Serialize};

use crate::errors::AuthError;

pub mod acl;

/// Where the matching ACL entry sits relative to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantPath {
    Direct,
    Parent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub party_id: ObjectId,
    pub entry_id: ObjectId,
    /// Resource the entry is attached to: the target or its parent.
    pub resource_id: ObjectId,
    pub path: GrantPath,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allow: bool,
    /// `None` when the mask requested no action at all.
    pub permission: Option<Permission>,
    #[serde(default)]
    pub grant: Option<Grant>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Decision {
    pub fn own_account(permission: Permission) -> Self {
        Self {
            allow: true,
            permission: Some(permission),
            grant: None,
            reason: Some("own-account".into()),
        }
    }

    pub fn granted(permission: Permission, grant: Grant) -> Self {
        Self {
            allow: true,
            permission: Some(permission),
            grant: Some(grant),
            reason: None,
        }
    }

    pub fn denied(permission: Permission) -> Self {
        Self {
            allow: false,
            permission: Some(permission),
            grant: None,
            reason: Some("no-matching-grant".into()),
        }
    }

    /// An empty mask asks for nothing and is granted nothing.
    pub fn no_action() -> Self {
        Self {
            allow: false,
            permission: None,
            grant: None,
            reason: Some("no-action-requested".into()),
        }
    }
}

/// Decides whether a session may perform one action on one resource.
///
/// Denial is `Ok` with `allow == false`; every `Err` is a failure to decide.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn decide(
        &self,
        token: &SessionToken,
        mask: &PermissionMask,
        resource_id: &ObjectId,
    ) -> Result<Decision, AuthError>;

    async fn authorize(
        &self,
        token: &SessionToken,
        mask: &PermissionMask,
        resource_id: &ObjectId,
    ) -> Result<bool, AuthError> {
        Ok(self.decide(token, mask, resource_id).await?.allow)
    }
}
