use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use harbor_auth::prelude::{
    AccessGate, AclAuthorizer, CredentialService, LocalPasswordAuthenticator, MemorySessionStore,
    SessionCookie,
};
use harbor_model::prelude::InMemoryAccessStore;
use tracing::debug;

use crate::config::Config;

pub struct CliContext {
    config: Arc<Config>,
    config_path: PathBuf,
}

impl CliContext {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
        }
    }

    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Validates the config, then builds the credential service with a fresh
    /// session store honouring the configured idle expiry.
    pub fn credential_service(&self) -> Result<Arc<CredentialService>> {
        self.config
            .validate()
            .with_context(|| format!("Invalid configuration ({})", self.config_path.display()))?;
        let policy = self.config.session_policy()?;
        let sessions = Arc::new(MemorySessionStore::new(policy.idle_ttl));
        let service = CredentialService::new(&self.config.secret_salt, sessions)
            .map_err(|err| anyhow::anyhow!("{}", err.user_message()))?;
        Ok(Arc::new(service))
    }

    /// Wires the request gate over `store` with local password logins.
    pub fn gate(
        &self,
        store: InMemoryAccessStore,
        credentials: Arc<CredentialService>,
    ) -> Result<AccessGate> {
        let session_policy = self.config.session_policy()?;
        let login_policy = self.config.login_policy()?;
        debug!(
            authorize = self.config.authorize,
            max_failures = ?login_policy.max_failures,
            "building access gate"
        );

        let authenticator = LocalPasswordAuthenticator::new(
            store.clone(),
            credentials.digester().clone(),
            login_policy,
        );
        let authorizer = AclAuthorizer::new(store.clone());
        Ok(AccessGate::new(
            credentials,
            Box::new(authenticator),
            Box::new(authorizer),
            Arc::new(store),
            SessionCookie::new(&session_policy),
        )
        .with_authorization(self.config.authorize))
    }
}
