use harbor_crypto::prelude::*;
use harbor_types::prelude::{Credentials, SessionId, SessionToken};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::errors::AuthError;
use crate::session::SessionStore;

const SEPARATOR: char = ':';

/// Mints and checks session ids, hashes passwords and owns the session cache.
///
/// A session id is `nonce:hex(sha512(salt || nonce))`. Anyone holding the salt
/// can verify it without consulting the cache, which is why
/// [`session_id_is_valid`](Self::session_id_is_valid) and
/// [`identify_session`](Self::identify_session) can disagree after logout.
pub struct CredentialService {
    digester: SaltedDigester,
    nonces: Arc<dyn NonceSource>,
    sessions: Arc<dyn SessionStore>,
}

// Opaque on purpose: the digester holds the secret salt.
impl std::fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialService").finish_non_exhaustive()
    }
}

impl CredentialService {
    pub fn new(secret_salt: &str, sessions: Arc<dyn SessionStore>) -> Result<Self, AuthError> {
        Ok(Self {
            digester: SaltedDigester::new(secret_salt)?,
            nonces: Arc::new(ClockNonce::new()),
            sessions,
        })
    }

    pub fn with_nonce_source(mut self, nonces: Arc<dyn NonceSource>) -> Self {
        self.nonces = nonces;
        self
    }

    pub fn digester(&self) -> &SaltedDigester {
        &self.digester
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    pub fn hash_password(&self, cleartext: &str) -> String {
        self.digester.hash_password(cleartext)
    }

    pub fn verify_password(&self, cleartext: &str, stored_hash: &str) -> bool {
        self.digester.verify_password(cleartext, stored_hash)
    }

    pub fn create_session_id(&self) -> SessionId {
        let nonce = self.nonces.next_nonce().to_string();
        let digest = self.digester.digest(nonce.as_bytes());
        SessionId(format!("{nonce}{SEPARATOR}{}", digest.as_hex()))
    }

    /// Pure cryptographic check; never touches the session cache.
    pub fn session_id_is_valid(&self, id: &SessionId) -> bool {
        let parts: Vec<&str> = id.as_str().split(SEPARATOR).collect();
        let [nonce, untrusted] = parts.as_slice() else {
            warn!(parts = parts.len(), "ill-formatted session id");
            return false;
        };
        let expected = self.digester.digest(nonce.as_bytes());
        constant_time_eq(expected.as_hex().as_bytes(), untrusted.as_bytes())
    }

    pub async fn create_session(&self, credentials: Credentials) -> SessionToken {
        let session_id = self.create_session_id();
        let user_id = credentials.user_id.clone();
        self.sessions.insert(session_id.clone(), credentials).await;
        info!(user = %user_id, "session created");
        SessionToken::new(session_id, user_id)
    }

    /// Cache lookup only; performs no cryptographic check.
    pub async fn identify_session(&self, id: &SessionId) -> Option<SessionToken> {
        match self.sessions.lookup(id).await {
            Some(credentials) => Some(SessionToken::new(id.clone(), credentials.user_id)),
            None => {
                debug!("no cached session for presented id");
                None
            }
        }
    }

    pub async fn invalidate_session_id(&self, id: &SessionId) {
        if self.sessions.remove(id).await {
            info!("session invalidated");
        }
    }

    pub async fn clear_all_sessions(&self) {
        self.sessions.clear().await;
        info!("all sessions cleared");
    }

    pub async fn evict_expired(&self) -> usize {
        let evicted = self.sessions.evict_expired().await;
        if evicted > 0 {
            info!(evicted, "idle sessions evicted");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::memory::MemorySessionStore;

    fn service() -> CredentialService {
        CredentialService::new("test-salt", Arc::new(MemorySessionStore::default())).unwrap()
    }

    #[test]
    fn session_id_has_nonce_and_hex_hash() {
        let id = service().create_session_id();
        let (nonce, hash) = id.as_str().split_once(':').unwrap();
        assert!(nonce.parse::<u64>().is_ok());
        assert_eq!(hash.len(), 128);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn tampered_hash_is_rejected() {
        let svc = service();
        let id = svc.create_session_id();
        let (nonce, _) = id.as_str().split_once(':').unwrap();
        let forged = SessionId(format!("{}:{}", nonce, "0".repeat(128)));
        assert!(!svc.session_id_is_valid(&forged));
        let shifted = SessionId(format!("{}1:{}", nonce, id.as_str().split_once(':').unwrap().1));
        assert!(!svc.session_id_is_valid(&shifted));
    }

    #[test]
    fn ids_from_another_salt_do_not_verify() {
        let a = service();
        let b = CredentialService::new("other-salt", Arc::new(MemorySessionStore::default()))
            .unwrap();
        assert!(!b.session_id_is_valid(&a.create_session_id()));
    }

    #[test]
    fn ids_are_unique() {
        let svc = service();
        let first = svc.create_session_id();
        let second = svc.create_session_id();
        assert_ne!(first, second);
    }
}
