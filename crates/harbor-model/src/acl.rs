use harbor_types::prelude::ObjectId;
use serde::{Deserialize, Serialize};

use crate::mask::{Permission, PermissionMask};

/// A grant binding one resource, one party and a capability set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    pub id: ObjectId,
    pub resource_id: ObjectId,
    pub party_id: ObjectId,
    pub mask: PermissionMask,
}

impl AclEntry {
    pub fn grants(&self, resource_id: &ObjectId, permission: Permission) -> bool {
        &self.resource_id == resource_id && self.mask.contains(permission)
    }
}
