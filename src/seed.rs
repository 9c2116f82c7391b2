//! YAML fixtures for the in-memory store.
//!
//! Resources are addressed by slash-separated name paths (`realm`,
//! `realm/repo`, `realm/repo/child`); groups by `realm/group`; users by
//! their login id.

use std::collections::BTreeMap;
use std::path::Path;

use harbor_auth::prelude::CredentialService;
use harbor_model::prelude::{
    InMemoryAccessStore, Permission, PermissionMask, ResourceKind, StorageError,
};
use harbor_types::prelude::{ObjectId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

/// Prefix that turns a `check` target into the named user's own object.
pub const USER_TARGET_PREFIX: &str = "user:";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("seed rejected by store: {}", store_message(.0))]
    Storage(#[from] StorageError),
    #[error("unknown {kind} '{name}' in seed")]
    Unknown { kind: &'static str, name: String },
    #[error("invalid seed: {0}")]
    Invalid(String),
}

fn store_message(err: &StorageError) -> &str {
    &err.0.message_user
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub realms: Vec<RealmSeed>,
    #[serde(default)]
    pub grants: Vec<GrantSeed>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RealmSeed {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub groups: Vec<GroupSeed>,
    #[serde(default)]
    pub repositories: Vec<RepositorySeed>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserSeed {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Cleartext; hashed with the configured salt on load.
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupSeed {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Login ids of users in the same realm.
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepositorySeed {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dockerfiles: Vec<DockerfileSeed>,
    #[serde(default)]
    pub images: Vec<ImageSeed>,
    #[serde(default)]
    pub scan_configs: Vec<ScanConfigSeed>,
    #[serde(default)]
    pub flags: Vec<FlagSeed>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DockerfileSeed {
    pub name: String,
    pub path: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageSeed {
    pub name: String,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanConfigSeed {
    pub name: String,
    pub provider: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlagSeed {
    pub name: String,
    pub image_path: String,
}

/// One ACL entry. Exactly one of `user` and `group` names the party.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GrantSeed {
    pub resource: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    pub permissions: Vec<Permission>,
}

/// Name-to-id lookups for what a seed created.
#[derive(Clone, Debug, Default)]
pub struct SeedIndex {
    pub resources: BTreeMap<String, ObjectId>,
    pub users: BTreeMap<String, ObjectId>,
    pub groups: BTreeMap<String, ObjectId>,
}

impl SeedIndex {
    pub fn resource(&self, path: &str) -> Result<&ObjectId, SeedError> {
        self.resources.get(path).ok_or_else(|| SeedError::Unknown {
            kind: "resource",
            name: path.to_string(),
        })
    }

    pub fn user(&self, login: &str) -> Result<&ObjectId, SeedError> {
        self.users.get(login).ok_or_else(|| SeedError::Unknown {
            kind: "user",
            name: login.to_string(),
        })
    }

    pub fn group(&self, path: &str) -> Result<&ObjectId, SeedError> {
        self.groups.get(path).ok_or_else(|| SeedError::Unknown {
            kind: "group",
            name: path.to_string(),
        })
    }

    /// A resource path, or `user:<login>` for the user's own object.
    pub fn target(&self, raw: &str) -> Result<&ObjectId, SeedError> {
        match raw.strip_prefix(USER_TARGET_PREFIX) {
            Some(login) => self.user(login),
            None => self.resource(raw),
        }
    }

    fn insert_resource(&mut self, path: String, id: ObjectId) -> Result<(), SeedError> {
        if self.resources.contains_key(&path) {
            return Err(SeedError::Invalid(format!("duplicate resource path '{path}'")));
        }
        self.resources.insert(path, id);
        Ok(())
    }
}

impl SeedFile {
    pub fn from_yaml(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub async fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path).await?;
        let seed = Self::from_yaml(&raw)?;
        info!(path = %path.display(), realms = seed.realms.len(), "loaded seed file");
        Ok(seed)
    }

    /// Creates everything in `store`. Realms go first, then their parties and
    /// resources, then grants, so grants may reference anything in the file.
    pub fn apply(
        &self,
        store: &InMemoryAccessStore,
        credentials: &CredentialService,
    ) -> Result<SeedIndex, SeedError> {
        let mut index = SeedIndex::default();

        for realm_seed in &self.realms {
            let realm = store.create_realm(&realm_seed.name, realm_seed.description.clone())?;
            let realm_id = realm.id().clone();
            index.insert_resource(realm_seed.name.clone(), realm_id.clone())?;

            for user in &realm_seed.users {
                let hash = credentials.hash_password(&user.password);
                let display = user.name.as_deref().unwrap_or(&user.user_id);
                let created =
                    store.create_user(&realm_id, &UserId::new(user.user_id.clone()), display, &hash)?;
                index.users.insert(user.user_id.clone(), created.id().clone());
            }

            for group in &realm_seed.groups {
                let created = store.create_group(&realm_id, &group.name, group.description.clone())?;
                for member in &group.members {
                    let user_obj = index.user(member)?.clone();
                    store.add_user_to_group(&user_obj, created.id())?;
                }
                index
                    .groups
                    .insert(format!("{}/{}", realm_seed.name, group.name), created.id().clone());
            }

            for repo_seed in &realm_seed.repositories {
                let repo =
                    store.create_repository(&realm_id, &repo_seed.name, repo_seed.description.clone())?;
                let repo_path = format!("{}/{}", realm_seed.name, repo_seed.name);
                index.insert_resource(repo_path.clone(), repo.id().clone())?;

                let children = repo_seed
                    .dockerfiles
                    .iter()
                    .map(|d| (&d.name, ResourceKind::dockerfile(d.path.clone())))
                    .chain(
                        repo_seed
                            .images
                            .iter()
                            .map(|i| (&i.name, ResourceKind::docker_image(i.signature.clone()))),
                    )
                    .chain(
                        repo_seed
                            .scan_configs
                            .iter()
                            .map(|s| (&s.name, ResourceKind::scan_config(s.provider.clone()))),
                    )
                    .chain(
                        repo_seed
                            .flags
                            .iter()
                            .map(|f| (&f.name, ResourceKind::flag(f.image_path.clone()))),
                    );
                for (name, kind) in children {
                    let child = store.create_resource(repo.id(), name, None, kind)?;
                    index.insert_resource(format!("{repo_path}/{name}"), child.id().clone())?;
                }
            }
        }

        for grant in &self.grants {
            let resource_id = index.resource(&grant.resource)?.clone();
            let party_id = match (&grant.user, &grant.group) {
                (Some(login), None) => index.user(login)?.clone(),
                (None, Some(group)) => index.group(group)?.clone(),
                _ => {
                    return Err(SeedError::Invalid(format!(
                        "grant on '{}' must name exactly one of user or group",
                        grant.resource
                    )))
                }
            };
            let mask = PermissionMask::of(&grant.permissions);
            store.add_access(&resource_id, &party_id, mask)?;
            debug!(resource = %grant.resource, %mask, "seed grant applied");
        }

        info!(
            resources = index.resources.len(),
            users = index.users.len(),
            groups = index.groups.len(),
            "seed applied"
        );
        Ok(index)
    }
}
