use harbor_crypto::CryptoError;
use harbor_errors::prelude::*;
use harbor_model::prelude::{MaskError, StorageError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0:?}")]
pub struct AuthError(pub Box<ErrorObj>);

impl AuthError {
    pub fn into_inner(self) -> ErrorObj {
        *self.0
    }

    pub fn code(&self) -> ErrorCode {
        self.0.code
    }

    pub fn http_status(&self) -> u16 {
        self.0.http_status
    }

    pub fn user_message(&self) -> &str {
        &self.0.message_user
    }

    fn build(builder: ErrorBuilder) -> Self {
        AuthError(Box::new(builder.build()))
    }
}

pub fn unauthenticated(msg: &str) -> AuthError {
    AuthError::build(ErrorBuilder::new(codes::AUTH_UNAUTHENTICATED).dev_msg(msg))
}

pub fn invalid_session(msg: &str) -> AuthError {
    AuthError::build(ErrorBuilder::new(codes::AUTH_INVALID_SESSION).dev_msg(msg))
}

pub fn identity_unresolved(user_id: &str) -> AuthError {
    AuthError::build(
        ErrorBuilder::new(codes::AUTH_IDENTITY_UNRESOLVED)
            .user_msg(format!(
                "user object cannot be identified from user id {user_id}"
            ))
            .meta_kv("user_id", json!(user_id)),
    )
}

pub fn forbidden_action(action: &str, resource_name: &str, resource_id: &str) -> AuthError {
    AuthError::build(
        ErrorBuilder::new(codes::AUTH_FORBIDDEN)
            .user_msg(format!(
                "Unauthorized: cannot perform {action} on {resource_name}"
            ))
            .meta_kv("resource", json!(resource_id))
            .meta_kv("action", json!(action)),
    )
}

pub fn too_many_attempts(failures: usize) -> AuthError {
    AuthError::build(
        ErrorBuilder::new(codes::AUTH_TOO_MANY_ATTEMPTS)
            .dev_msg(format!("{failures} recent failed attempts")),
    )
}

pub fn invalid_mask(err: &MaskError) -> AuthError {
    AuthError::build(
        ErrorBuilder::new(codes::REQUEST_INVALID_ACTION_MASK)
            .user_msg(err.to_string())
            .dev_msg(err.to_string()),
    )
}

pub fn provider_unavailable(msg: &str) -> AuthError {
    AuthError::build(ErrorBuilder::new(codes::PROVIDER_UNAVAILABLE).dev_msg(msg))
}

pub fn invalid_settings(msg: &str) -> AuthError {
    AuthError::build(
        ErrorBuilder::new(codes::SCHEMA_VALIDATION)
            .user_msg(msg)
            .dev_msg(msg),
    )
}

/// Storage failures cross into the auth domain untouched.
impl From<StorageError> for AuthError {
    fn from(value: StorageError) -> Self {
        AuthError(value.0)
    }
}

impl From<CryptoError> for AuthError {
    fn from(value: CryptoError) -> Self {
        AuthError(value.0)
    }
}

impl From<ErrorObj> for AuthError {
    fn from(value: ErrorObj) -> Self {
        AuthError(Box::new(value))
    }
}
