use harbor_errors::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0:?}")]
pub struct CryptoError(pub Box<ErrorObj>);

impl CryptoError {
    pub fn into_inner(self) -> ErrorObj {
        *self.0
    }

    pub fn missing_salt() -> Self {
        Self::from_builder(
            ErrorBuilder::new(codes::SCHEMA_VALIDATION)
                .user_msg("A secret salt must be configured.")
                .dev_msg("salt is empty"),
        )
    }

    pub fn io(msg: &str) -> Self {
        Self::from_builder(
            ErrorBuilder::new(codes::STORAGE_UNAVAILABLE)
                .user_msg("Unable to read content for signing.")
                .dev_msg(msg),
        )
    }

    fn from_builder(builder: ErrorBuilder) -> Self {
        CryptoError(Box::new(builder.build()))
    }
}

impl From<ErrorObj> for CryptoError {
    fn from(value: ErrorObj) -> Self {
        CryptoError(Box::new(value))
    }
}
