use thiserror::Error;

use crate::credentials::{Credentials, SessionToken};

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("empty_field:{0}")]
    EmptyField(&'static str),
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidateError>;
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), ValidateError> {
        if self.user_id.0.is_empty() {
            return Err(ValidateError::EmptyField("user_id"));
        }
        Ok(())
    }
}

impl Validate for SessionToken {
    fn validate(&self) -> Result<(), ValidateError> {
        if self.session_id.0.is_empty() {
            return Err(ValidateError::EmptyField("session_id"));
        }
        if self.user_id.0.is_empty() {
            return Err(ValidateError::EmptyField("user_id"));
        }
        Ok(())
    }
}
