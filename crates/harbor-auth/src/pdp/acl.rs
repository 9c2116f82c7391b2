use super::*;
use harbor_model::prelude::{AccessStore, AclEntry, MaskError, Party, Resource};
use tracing::debug;

use crate::errors;
use crate::events::AuthDecisionEvent;

/// ACL-driven decisions over the resource tree.
///
/// Candidates are the user followed by the user's groups in membership
/// order. For each candidate, entries on the target are checked first, then
/// entries on the target's immediate parent. Grants on the grandparent or
/// higher are never consulted.
pub struct AclAuthorizer<S> {
    store: S,
}

impl<S: AccessStore> AclAuthorizer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn entries_of(&self, party: &Party) -> Result<Vec<AclEntry>, AuthError> {
        let mut entries = Vec::with_capacity(party.acl_entry_ids().len());
        for id in party.acl_entry_ids() {
            entries.push(self.store.acl_entry(id).await?);
        }
        Ok(entries)
    }

    async fn decide_inner(
        &self,
        token: &SessionToken,
        permission: Permission,
        resource_id: &ObjectId,
    ) -> Result<Decision, AuthError> {
        let user = match self.store.user_by_user_id(&token.user_id).await {
            Ok(user) => user,
            Err(err) if err.is_not_found() => {
                return Err(errors::identity_unresolved(token.user_id.as_str()))
            }
            Err(err) => return Err(err.into()),
        };

        if user.id() == resource_id {
            debug!(user = %token.user_id, "acting on own account");
            return Ok(Decision::own_account(permission));
        }

        let resource = self.store.resource(resource_id).await?;
        let mut parent: Option<Resource> = None;

        let group_ids = user.group_ids.clone();
        let mut candidate = Some(Party::User(user));
        let mut remaining_groups = group_ids.iter();

        while let Some(party) = candidate.take() {
            let entries = self.entries_of(&party).await?;
            debug!(party = %party.id(), entries = entries.len(), "checking candidate party");

            if let Some(entry) = entries.iter().find(|e| e.grants(resource.id(), permission)) {
                return Ok(Decision::granted(
                    permission,
                    Grant {
                        party_id: party.id().clone(),
                        entry_id: entry.id.clone(),
                        resource_id: resource.id().clone(),
                        path: GrantPath::Direct,
                    },
                ));
            }

            if let Some(parent_id) = resource.parent_id() {
                if parent.is_none() {
                    parent = Some(self.store.resource(parent_id).await?);
                }
                if let Some(parent) = parent.as_ref() {
                    if let Some(entry) = entries.iter().find(|e| e.grants(parent.id(), permission)) {
                        return Ok(Decision::granted(
                            permission,
                            Grant {
                                party_id: party.id().clone(),
                                entry_id: entry.id.clone(),
                                resource_id: parent.id().clone(),
                                path: GrantPath::Parent,
                            },
                        ));
                    }
                }
            }

            if let Some(group_id) = remaining_groups.next() {
                candidate = Some(self.store.party(group_id).await?);
            }
        }

        Ok(Decision::denied(permission))
    }
}

#[async_trait]
impl<S: AccessStore> Authorizer for AclAuthorizer<S> {
    async fn decide(
        &self,
        token: &SessionToken,
        mask: &PermissionMask,
        resource_id: &ObjectId,
    ) -> Result<Decision, AuthError> {
        let decision = match mask.single_action() {
            Ok(permission) => self.decide_inner(token, permission, resource_id).await?,
            Err(MaskError::NotSingle(0)) => Decision::no_action(),
            Err(err) => return Err(errors::invalid_mask(&err)),
        };
        AuthDecisionEvent::new(token, resource_id, &decision).emit();
        Ok(decision)
    }
}
