pub use crate::acl::AclEntry;
pub use crate::errors::StorageError;
pub use crate::mask::{MaskError, Permission, PermissionMask};
pub use crate::memory::InMemoryAccessStore;
pub use crate::names::{conforms_to_docker_rules, local_image_name_is_valid, validate_image_name};
pub use crate::party::{Group, LoginAttempt, Party, PartyCommon, User};
pub use crate::resource::{
    DockerImageData, DockerfileData, FlagData, RealmData, RepositoryData, Resource,
    ResourceCommon, ResourceKind, ResourceType, ScanConfigData,
};
pub use crate::store::{AccessStore, LoginHistory};
