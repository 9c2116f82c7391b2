use async_trait::async_trait;
use harbor_types::prelude::{ObjectId, UserId};
use std::sync::Arc;

use crate::acl::AclEntry;
use crate::errors::StorageError;
use crate::party::{LoginAttempt, Party, User};
use crate::resource::Resource;

/// Read-only lookups the authorization engine depends on.
///
/// Every lookup fails with a `STORAGE.NOT_FOUND` error when the id does not
/// resolve; backends may fail with any other storage error as well.
#[async_trait]
pub trait AccessStore: Send + Sync {
    async fn resource(&self, id: &ObjectId) -> Result<Resource, StorageError>;
    async fn party(&self, id: &ObjectId) -> Result<Party, StorageError>;
    async fn acl_entry(&self, id: &ObjectId) -> Result<AclEntry, StorageError>;
    async fn user_by_user_id(&self, user_id: &UserId) -> Result<User, StorageError>;
}

/// Append-only record of login attempts per user.
#[async_trait]
pub trait LoginHistory: Send + Sync {
    async fn record_login_attempt(
        &self,
        user: &ObjectId,
        attempt: LoginAttempt,
    ) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: AccessStore + ?Sized> AccessStore for Arc<T> {
    async fn resource(&self, id: &ObjectId) -> Result<Resource, StorageError> {
        (**self).resource(id).await
    }

    async fn party(&self, id: &ObjectId) -> Result<Party, StorageError> {
        (**self).party(id).await
    }

    async fn acl_entry(&self, id: &ObjectId) -> Result<AclEntry, StorageError> {
        (**self).acl_entry(id).await
    }

    async fn user_by_user_id(&self, user_id: &UserId) -> Result<User, StorageError> {
        (**self).user_by_user_id(user_id).await
    }
}

#[async_trait]
impl<T: LoginHistory + ?Sized> LoginHistory for Arc<T> {
    async fn record_login_attempt(
        &self,
        user: &ObjectId,
        attempt: LoginAttempt,
    ) -> Result<(), StorageError> {
        (**self).record_login_attempt(user, attempt).await
    }
}
