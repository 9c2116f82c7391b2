use harbor_types::prelude::{ObjectId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::StorageError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Realm,
    Repository,
    Dockerfile,
    DockerImage,
    ScanConfig,
    Flag,
}

impl ResourceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceType::Realm => "realm",
            ResourceType::Repository => "repository",
            ResourceType::Dockerfile => "dockerfile",
            ResourceType::DockerImage => "docker image",
            ResourceType::ScanConfig => "scan config",
            ResourceType::Flag => "flag",
        }
    }

    /// Kind a parent must be for a resource of this kind; `None` for realms.
    pub const fn parent_kind(self) -> Option<ResourceType> {
        match self {
            ResourceType::Realm => None,
            ResourceType::Repository => Some(ResourceType::Realm),
            ResourceType::Dockerfile
            | ResourceType::DockerImage
            | ResourceType::ScanConfig
            | ResourceType::Flag => Some(ResourceType::Repository),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields every resource carries regardless of kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceCommon {
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: Timestamp,
    parent_id: Option<ObjectId>,
    #[serde(default)]
    acl_entry_ids: Vec<ObjectId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RealmData {
    pub admin_user_id: Option<ObjectId>,
    pub file_directory: Option<String>,
    pub user_ids: Vec<ObjectId>,
    pub group_ids: Vec<ObjectId>,
    pub repo_ids: Vec<ObjectId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryData {
    pub file_directory: Option<String>,
    pub dockerfile_ids: Vec<ObjectId>,
    pub image_ids: Vec<ObjectId>,
    pub scan_config_ids: Vec<ObjectId>,
    pub flag_ids: Vec<ObjectId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DockerfileData {
    pub external_file_path: String,
    pub exec_event_ids: Vec<ObjectId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DockerImageData {
    /// Hex SHA-512 of the saved image content.
    pub signature: Option<String>,
    pub build_output: Option<String>,
    /// Oldest first.
    pub scan_event_ids: Vec<ObjectId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanConfigData {
    pub provider_name: String,
    pub success_expr: Option<String>,
    pub flag_id: Option<ObjectId>,
    pub parameter_value_ids: Vec<ObjectId>,
    pub scan_event_ids: Vec<ObjectId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagData {
    pub success_image_path: String,
    pub used_by_scan_config_ids: Vec<ObjectId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceKind {
    Realm(RealmData),
    Repository(RepositoryData),
    Dockerfile(DockerfileData),
    DockerImage(DockerImageData),
    ScanConfig(ScanConfigData),
    Flag(FlagData),
}

impl ResourceKind {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ResourceKind::Realm(_) => ResourceType::Realm,
            ResourceKind::Repository(_) => ResourceType::Repository,
            ResourceKind::Dockerfile(_) => ResourceType::Dockerfile,
            ResourceKind::DockerImage(_) => ResourceType::DockerImage,
            ResourceKind::ScanConfig(_) => ResourceType::ScanConfig,
            ResourceKind::Flag(_) => ResourceType::Flag,
        }
    }

    pub fn dockerfile(external_file_path: impl Into<String>) -> Self {
        ResourceKind::Dockerfile(DockerfileData {
            external_file_path: external_file_path.into(),
            ..Default::default()
        })
    }

    pub fn docker_image(signature: Option<String>) -> Self {
        ResourceKind::DockerImage(DockerImageData {
            signature,
            ..Default::default()
        })
    }

    pub fn scan_config(provider_name: impl Into<String>) -> Self {
        ResourceKind::ScanConfig(ScanConfigData {
            provider_name: provider_name.into(),
            ..Default::default()
        })
    }

    pub fn flag(success_image_path: impl Into<String>) -> Self {
        ResourceKind::Flag(FlagData {
            success_image_path: success_image_path.into(),
            ..Default::default()
        })
    }
}

/// A node of the ownership tree. The parent is set at construction and
/// cannot be changed afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub common: ResourceCommon,
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new_realm(
        id: ObjectId,
        name: impl Into<String>,
        description: Option<String>,
        data: RealmData,
    ) -> Self {
        Self {
            common: ResourceCommon {
                id,
                name: name.into(),
                description,
                created_at: Timestamp::now(),
                parent_id: None,
                acl_entry_ids: Vec::new(),
            },
            kind: ResourceKind::Realm(data),
        }
    }

    /// Builds a non-realm resource under `parent`, checking the parent kind.
    pub fn new_child(
        id: ObjectId,
        parent: &Resource,
        name: impl Into<String>,
        description: Option<String>,
        kind: ResourceKind,
    ) -> Result<Self, StorageError> {
        let child_type = kind.resource_type();
        let expected = child_type.parent_kind().ok_or_else(|| {
            StorageError::bad_request("a realm is the root of its tree and takes no parent")
        })?;
        if parent.resource_type() != expected {
            return Err(StorageError::bad_request(&format!(
                "a {child_type} must be created under a {expected}, not a {}",
                parent.resource_type()
            )));
        }
        Ok(Self {
            common: ResourceCommon {
                id,
                name: name.into(),
                description,
                created_at: Timestamp::now(),
                parent_id: Some(parent.id().clone()),
                acl_entry_ids: Vec::new(),
            },
            kind,
        })
    }

    pub fn id(&self) -> &ObjectId {
        &self.common.id
    }

    pub fn name(&self) -> &str {
        &self.common.name
    }

    pub fn description(&self) -> Option<&str> {
        self.common.description.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.common.created_at
    }

    pub fn parent_id(&self) -> Option<&ObjectId> {
        self.common.parent_id.as_ref()
    }

    pub fn acl_entry_ids(&self) -> &[ObjectId] {
        &self.common.acl_entry_ids
    }

    /// Records a grant back-reference; does not touch storage.
    pub fn attach_acl_entry(&mut self, entry_id: ObjectId) {
        if !self.common.acl_entry_ids.contains(&entry_id) {
            self.common.acl_entry_ids.push(entry_id);
        }
    }

    pub fn detach_acl_entry(&mut self, entry_id: &ObjectId) {
        self.common.acl_entry_ids.retain(|id| id != entry_id);
    }

    pub fn resource_type(&self) -> ResourceType {
        self.kind.resource_type()
    }

    pub fn is_realm(&self) -> bool {
        matches!(self.kind, ResourceKind::Realm(_))
    }

    pub fn is_repository(&self) -> bool {
        matches!(self.kind, ResourceKind::Repository(_))
    }

    pub fn is_dockerfile(&self) -> bool {
        matches!(self.kind, ResourceKind::Dockerfile(_))
    }

    pub fn is_docker_image(&self) -> bool {
        matches!(self.kind, ResourceKind::DockerImage(_))
    }

    pub fn is_scan_config(&self) -> bool {
        matches!(self.kind, ResourceKind::ScanConfig(_))
    }

    pub fn is_flag(&self) -> bool {
        matches!(self.kind, ResourceKind::Flag(_))
    }
}
