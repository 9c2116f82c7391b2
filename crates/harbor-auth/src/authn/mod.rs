use async_trait::async_trait;
use harbor_types::prelude::{Credentials, UserId};

use crate::errors::AuthError;

pub mod local;
pub mod remote;

/// Result of checking presented credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthnOutcome {
    Authenticated(UserId),
    Rejected(String),
    /// The identity provider could not be reached; callers treat this as
    /// unauthenticated, never as a crash.
    Unreachable(String),
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthnOutcome, AuthError>;
}
