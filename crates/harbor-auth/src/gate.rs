use harbor_model::prelude::{AccessStore, PermissionMask};
use harbor_types::prelude::{Credentials, ObjectId, SessionToken, Validate};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::authn::{AuthnOutcome, Authenticator};
use crate::cookie::SessionCookie;
use crate::credential::CredentialService;
use crate::errors::{self, AuthError};
use crate::pdp::Authorizer;

/// What request handlers call: login/logout, session checks and the
/// per-handler authorization guard.
pub struct AccessGate {
    credentials: Arc<CredentialService>,
    authenticator: Box<dyn Authenticator>,
    authorizer: Box<dyn Authorizer>,
    store: Arc<dyn AccessStore>,
    cookie: SessionCookie,
    authorize_enabled: bool,
}

impl AccessGate {
    pub fn new(
        credentials: Arc<CredentialService>,
        authenticator: Box<dyn Authenticator>,
        authorizer: Box<dyn Authorizer>,
        store: Arc<dyn AccessStore>,
        cookie: SessionCookie,
    ) -> Self {
        Self {
            credentials,
            authenticator,
            authorizer,
            store,
            cookie,
            authorize_enabled: true,
        }
    }

    /// Development switch; when off, `authorize_handler_action` admits everything.
    pub fn with_authorization(mut self, enabled: bool) -> Self {
        self.authorize_enabled = enabled;
        self
    }

    pub fn credentials(&self) -> &Arc<CredentialService> {
        &self.credentials
    }

    pub async fn login(&self, credentials: Credentials) -> Result<SessionToken, AuthError> {
        credentials
            .validate()
            .map_err(|err| errors::unauthenticated(&err.to_string()))?;
        match self.authenticator.authenticate(&credentials).await? {
            AuthnOutcome::Authenticated(user_id) => {
                let credentials = Credentials {
                    user_id,
                    ..credentials
                };
                Ok(self.credentials.create_session(credentials).await)
            }
            AuthnOutcome::Rejected(reason) => {
                info!(user = %credentials.user_id, %reason, "login rejected");
                Err(errors::unauthenticated(&reason))
            }
            AuthnOutcome::Unreachable(reason) => {
                warn!(user = %credentials.user_id, %reason, "login failed: identity provider unreachable");
                Err(errors::unauthenticated(&reason))
            }
        }
    }

    pub async fn logout(&self, token: &SessionToken) {
        self.credentials.invalidate_session_id(&token.session_id).await;
    }

    /// Cache path: the `SessionId` cookie must name a live cached session.
    pub async fn authenticate_request_cookie(
        &self,
        cookie_header: Option<&str>,
    ) -> Option<SessionToken> {
        let session_id = self.cookie.extract(cookie_header)?;
        self.credentials.identify_session(&session_id).await
    }

    /// Cryptographic path: the id must verify and its user must resolve.
    pub async fn authenticate_session(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<(), AuthError> {
        let token = token.ok_or_else(|| errors::unauthenticated("no session token"))?;
        if !self.credentials.session_id_is_valid(&token.session_id) {
            return Err(errors::invalid_session("session id failed verification"));
        }
        match self.store.user_by_user_id(&token.user_id).await {
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => {
                Err(errors::identity_unresolved(token.user_id.as_str()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Positional boolean mask as received from a request.
    pub async fn authorize(
        &self,
        token: &SessionToken,
        mask: &[bool],
        resource_id: &ObjectId,
    ) -> Result<bool, AuthError> {
        let mask = PermissionMask::from_bits(mask).map_err(|err| errors::invalid_mask(&err))?;
        self.authorizer.authorize(token, &mask, resource_id).await
    }

    /// Turns a denial into `AUTH.FORBIDDEN` naming the action and resource.
    pub async fn authorize_handler_action(
        &self,
        token: &SessionToken,
        mask: &[bool],
        resource_id: &ObjectId,
        attempted_action: &str,
    ) -> Result<(), AuthError> {
        if !self.authorize_enabled {
            debug!(resource = %resource_id, "authorization disabled; admitting");
            return Ok(());
        }
        if self.authorize(token, mask, resource_id).await? {
            return Ok(());
        }
        let resource = self.store.resource(resource_id).await?;
        Err(errors::forbidden_action(
            attempted_action,
            resource.name(),
            resource_id.as_str(),
        ))
    }

    pub fn set_cookie_header(&self, token: &SessionToken) -> String {
        self.cookie.render(&token.session_id)
    }
}
