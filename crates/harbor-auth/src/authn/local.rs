use super::*;
use harbor_crypto::SaltedDigester;
use harbor_model::prelude::{AccessStore, LoginAttempt, LoginHistory};
use harbor_types::prelude::Timestamp;
use tracing::{debug, warn};

use crate::config::LoginPolicy;
use crate::errors;

/// Checks passwords against the stored digest and records every attempt.
pub struct LocalPasswordAuthenticator<S> {
    store: S,
    digester: SaltedDigester,
    policy: LoginPolicy,
}

impl<S> LocalPasswordAuthenticator<S>
where
    S: AccessStore + LoginHistory,
{
    pub fn new(store: S, digester: SaltedDigester, policy: LoginPolicy) -> Self {
        Self {
            store,
            digester,
            policy,
        }
    }
}

#[async_trait]
impl<S> Authenticator for LocalPasswordAuthenticator<S>
where
    S: AccessStore + LoginHistory,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthnOutcome, AuthError> {
        let user = match self.store.user_by_user_id(&credentials.user_id).await {
            Ok(user) => user,
            Err(err) if err.is_not_found() => {
                debug!(user = %credentials.user_id, "login for unknown user");
                return Ok(AuthnOutcome::Rejected("unknown user or bad password".into()));
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(limit) = self.policy.max_failures {
            let window_ms = i64::try_from(self.policy.window.as_millis()).unwrap_or(i64::MAX);
            let since = Timestamp::now().saturating_sub_millis(window_ms);
            let failures = user.recent_failures(since);
            if failures >= limit as usize {
                warn!(user = %credentials.user_id, failures, "login blocked after repeated failures");
                return Err(errors::too_many_attempts(failures));
            }
        }

        let succeeded = self
            .digester
            .verify_password(&credentials.password, &user.password_hash);
        self.store
            .record_login_attempt(user.id(), LoginAttempt::now(succeeded))
            .await?;

        if succeeded {
            Ok(AuthnOutcome::Authenticated(user.user_id))
        } else {
            debug!(user = %credentials.user_id, "password mismatch");
            Ok(AuthnOutcome::Rejected("unknown user or bad password".into()))
        }
    }
}
