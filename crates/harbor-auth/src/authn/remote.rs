use super::*;
use tracing::warn;

/// Transport to an external identity service.
///
/// `Ok(true)` accepts the credentials, `Ok(false)` rejects them and `Err`
/// reports that the service could not be asked.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn verify(&self, service: &str, credentials: &Credentials) -> Result<bool, String>;
}

/// Delegates credential checks to an [`IdentityClient`].
pub struct RemoteAuthenticator {
    service: String,
    client: Box<dyn IdentityClient>,
}

impl RemoteAuthenticator {
    pub fn new(service: impl Into<String>, client: Box<dyn IdentityClient>) -> Self {
        Self {
            service: service.into(),
            client,
        }
    }
}

#[async_trait]
impl Authenticator for RemoteAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthnOutcome, AuthError> {
        match self.client.verify(&self.service, credentials).await {
            Ok(true) => Ok(AuthnOutcome::Authenticated(credentials.user_id.clone())),
            Ok(false) => Ok(AuthnOutcome::Rejected("identity provider refused".into())),
            Err(reason) => {
                warn!(service = %self.service, %reason, "identity provider unreachable");
                Ok(AuthnOutcome::Unreachable(reason))
            }
        }
    }
}
