use async_trait::async_trait;
use harbor_types::prelude::{ObjectId, UserId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::acl::AclEntry;
use crate::errors::StorageError;
use crate::mask::PermissionMask;
use crate::names::validate_image_name;
use crate::party::{Group, LoginAttempt, Party, PartyCommon, User};
use crate::resource::{RealmData, Resource, ResourceKind, RepositoryData};
use crate::store::{AccessStore, LoginHistory};

/// Reference store keeping every object in process memory.
///
/// Cloning shares the same tables. All mutations that touch more than one
/// object happen under a single write lock.
#[derive(Clone, Default)]
pub struct InMemoryAccessStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    resources: HashMap<ObjectId, Resource>,
    parties: HashMap<ObjectId, Party>,
    acl_entries: HashMap<ObjectId, AclEntry>,
    users_by_login: HashMap<UserId, ObjectId>,
}

impl Tables {
    fn resource(&self, id: &ObjectId) -> Result<&Resource, StorageError> {
        self.resources
            .get(id)
            .ok_or_else(|| StorageError::not_found("resource", id.as_str()))
    }

    fn resource_mut(&mut self, id: &ObjectId) -> Result<&mut Resource, StorageError> {
        self.resources
            .get_mut(id)
            .ok_or_else(|| StorageError::not_found("resource", id.as_str()))
    }

    fn party_mut(&mut self, id: &ObjectId) -> Result<&mut Party, StorageError> {
        self.parties
            .get_mut(id)
            .ok_or_else(|| StorageError::not_found("party", id.as_str()))
    }

    fn realm_data_mut(&mut self, id: &ObjectId) -> Result<&mut RealmData, StorageError> {
        match &mut self.resource_mut(id)?.kind {
            ResourceKind::Realm(data) => Ok(data),
            _ => Err(StorageError::bad_request(&format!(
                "{} is not a realm",
                id.as_str()
            ))),
        }
    }

    fn entry_for(&self, resource_id: &ObjectId, party_id: &ObjectId) -> Option<&AclEntry> {
        self.acl_entries
            .values()
            .find(|e| &e.resource_id == resource_id && &e.party_id == party_id)
    }
}

impl InMemoryAccessStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_realm(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Resource, StorageError> {
        let mut tables = self.inner.write();
        if tables
            .resources
            .values()
            .any(|r| r.is_realm() && r.name() == name)
        {
            return Err(StorageError::conflict(&format!("realm {name} already exists")));
        }
        let realm = Resource::new_realm(ObjectId::new_random(), name, description, RealmData::default());
        tables.resources.insert(realm.id().clone(), realm.clone());
        debug!(realm = %realm.id(), name, "realm created");
        Ok(realm)
    }

    pub fn create_repository(
        &self,
        realm_id: &ObjectId,
        name: &str,
        description: Option<String>,
    ) -> Result<Resource, StorageError> {
        self.create_resource(
            realm_id,
            name,
            description,
            ResourceKind::Repository(RepositoryData::default()),
        )
    }

    /// Creates any non-realm resource under `parent_id` and links it into the
    /// parent's child list.
    pub fn create_resource(
        &self,
        parent_id: &ObjectId,
        name: &str,
        description: Option<String>,
        kind: ResourceKind,
    ) -> Result<Resource, StorageError> {
        if matches!(kind, ResourceKind::DockerImage(_)) {
            validate_image_name(name)?;
        }
        let mut tables = self.inner.write();
        let parent = tables.resource(parent_id)?;
        let resource = Resource::new_child(ObjectId::new_random(), parent, name, description, kind)?;
        let id = resource.id().clone();

        match (&mut tables.resource_mut(parent_id)?.kind, &resource.kind) {
            (ResourceKind::Realm(realm), ResourceKind::Repository(_)) => {
                realm.repo_ids.push(id.clone())
            }
            (ResourceKind::Repository(repo), ResourceKind::Dockerfile(_)) => {
                repo.dockerfile_ids.push(id.clone())
            }
            (ResourceKind::Repository(repo), ResourceKind::DockerImage(_)) => {
                repo.image_ids.push(id.clone())
            }
            (ResourceKind::Repository(repo), ResourceKind::ScanConfig(_)) => {
                repo.scan_config_ids.push(id.clone())
            }
            (ResourceKind::Repository(repo), ResourceKind::Flag(_)) => {
                repo.flag_ids.push(id.clone())
            }
            _ => {
                return Err(StorageError::internal(
                    "parent kind passed validation but has no child list",
                ))
            }
        }

        tables.resources.insert(id.clone(), resource.clone());
        debug!(resource = %id, parent = %parent_id, kind = %resource.resource_type(), "resource created");
        Ok(resource)
    }

    pub fn create_user(
        &self,
        realm_id: &ObjectId,
        user_id: &UserId,
        name: &str,
        password_hash: &str,
    ) -> Result<User, StorageError> {
        let mut tables = self.inner.write();
        if tables.users_by_login.contains_key(user_id) {
            return Err(StorageError::conflict(&format!(
                "user id {} is already taken",
                user_id.as_str()
            )));
        }
        let id = ObjectId::new_random();
        tables.realm_data_mut(realm_id)?.user_ids.push(id.clone());

        let user = User::new(
            PartyCommon::new(id.clone(), name, realm_id.clone()),
            user_id.clone(),
            password_hash,
        );
        tables.users_by_login.insert(user_id.clone(), id.clone());
        tables.parties.insert(id, Party::User(user.clone()));
        Ok(user)
    }

    pub fn create_group(
        &self,
        realm_id: &ObjectId,
        name: &str,
        description: Option<String>,
    ) -> Result<Group, StorageError> {
        let mut tables = self.inner.write();
        let id = ObjectId::new_random();
        tables.realm_data_mut(realm_id)?.group_ids.push(id.clone());
        let group = Group::new(PartyCommon::new(id.clone(), name, realm_id.clone()), description);
        tables.parties.insert(id, Party::Group(group.clone()));
        Ok(group)
    }

    /// Adds membership on both sides. Adding an existing member is a no-op.
    /// User and group must belong to the same realm.
    pub fn add_user_to_group(
        &self,
        user_obj_id: &ObjectId,
        group_id: &ObjectId,
    ) -> Result<(), StorageError> {
        let mut tables = self.inner.write();
        let group_realm = match tables.party_mut(group_id)? {
            Party::Group(group) => group.common.realm_id.clone(),
            Party::User(_) => {
                return Err(StorageError::bad_request("groups cannot contain groups or be users"))
            }
        };
        match tables.party_mut(user_obj_id)? {
            Party::User(user) => {
                if user.common.realm_id != group_realm {
                    return Err(StorageError::bad_request(
                        "user and group belong to different realms",
                    ));
                }
                if !user.group_ids.contains(group_id) {
                    user.group_ids.push(group_id.clone());
                }
            }
            Party::Group(_) => {
                return Err(StorageError::bad_request("groups cannot contain groups"))
            }
        }
        if let Party::Group(group) = tables.party_mut(group_id)? {
            if !group.user_ids.contains(user_obj_id) {
                group.user_ids.push(user_obj_id.clone());
            }
        }
        Ok(())
    }

    /// Grants exactly `mask`, replacing the mask of any existing entry for the pair.
    pub fn set_access(
        &self,
        resource_id: &ObjectId,
        party_id: &ObjectId,
        mask: PermissionMask,
    ) -> Result<AclEntry, StorageError> {
        self.upsert_access(resource_id, party_id, |_| mask)
    }

    /// Adds the bits of `mask` to whatever the pair already holds.
    pub fn add_access(
        &self,
        resource_id: &ObjectId,
        party_id: &ObjectId,
        mask: PermissionMask,
    ) -> Result<AclEntry, StorageError> {
        self.upsert_access(resource_id, party_id, |existing| existing.union(mask))
    }

    fn upsert_access(
        &self,
        resource_id: &ObjectId,
        party_id: &ObjectId,
        merge: impl FnOnce(PermissionMask) -> PermissionMask,
    ) -> Result<AclEntry, StorageError> {
        let mut tables = self.inner.write();
        tables.resource(resource_id)?;
        tables.party_mut(party_id)?;

        if let Some(existing) = tables.entry_for(resource_id, party_id).cloned() {
            let updated = AclEntry {
                mask: merge(existing.mask),
                ..existing
            };
            tables.acl_entries.insert(updated.id.clone(), updated.clone());
            return Ok(updated);
        }

        let entry = AclEntry {
            id: ObjectId::new_random(),
            resource_id: resource_id.clone(),
            party_id: party_id.clone(),
            mask: merge(PermissionMask::none()),
        };
        tables.resource_mut(resource_id)?.attach_acl_entry(entry.id.clone());
        let party = tables.party_mut(party_id)?.common_mut();
        if !party.acl_entry_ids.contains(&entry.id) {
            party.acl_entry_ids.push(entry.id.clone());
        }
        tables.acl_entries.insert(entry.id.clone(), entry.clone());
        debug!(entry = %entry.id, resource = %resource_id, party = %party_id, mask = %entry.mask, "acl entry created");
        Ok(entry)
    }

    /// Removes the pair's entry and both back-references.
    pub fn delete_access(
        &self,
        resource_id: &ObjectId,
        party_id: &ObjectId,
    ) -> Result<(), StorageError> {
        let mut tables = self.inner.write();
        let entry_id = tables
            .entry_for(resource_id, party_id)
            .map(|e| e.id.clone())
            .ok_or_else(|| StorageError::not_found("acl entry", resource_id.as_str()))?;
        tables.acl_entries.remove(&entry_id);
        if let Some(resource) = tables.resources.get_mut(resource_id) {
            resource.detach_acl_entry(&entry_id);
        }
        if let Some(party) = tables.parties.get_mut(party_id) {
            party.common_mut().acl_entry_ids.retain(|id| id != &entry_id);
        }
        Ok(())
    }

    pub fn acl_entry_for(&self, resource_id: &ObjectId, party_id: &ObjectId) -> Option<AclEntry> {
        self.inner.read().entry_for(resource_id, party_id).cloned()
    }

    pub fn resource_count(&self) -> usize {
        self.inner.read().resources.len()
    }
}

#[async_trait]
impl AccessStore for InMemoryAccessStore {
    async fn resource(&self, id: &ObjectId) -> Result<Resource, StorageError> {
        self.inner.read().resource(id).cloned()
    }

    async fn party(&self, id: &ObjectId) -> Result<Party, StorageError> {
        self.inner
            .read()
            .parties
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("party", id.as_str()))
    }

    async fn acl_entry(&self, id: &ObjectId) -> Result<AclEntry, StorageError> {
        self.inner
            .read()
            .acl_entries
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("acl entry", id.as_str()))
    }

    async fn user_by_user_id(&self, user_id: &UserId) -> Result<User, StorageError> {
        let tables = self.inner.read();
        tables
            .users_by_login
            .get(user_id)
            .and_then(|id| tables.parties.get(id))
            .and_then(Party::as_user)
            .cloned()
            .ok_or_else(|| StorageError::not_found("user", user_id.as_str()))
    }
}

#[async_trait]
impl LoginHistory for InMemoryAccessStore {
    async fn record_login_attempt(
        &self,
        user: &ObjectId,
        attempt: LoginAttempt,
    ) -> Result<(), StorageError> {
        match self.inner.write().party_mut(user)? {
            Party::User(user) => {
                user.login_attempts.push(attempt);
                Ok(())
            }
            Party::Group(_) => Err(StorageError::bad_request("login attempts belong to users")),
        }
    }
}
