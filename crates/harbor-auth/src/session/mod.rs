use async_trait::async_trait;
use harbor_types::prelude::{Credentials, SessionId};

pub mod memory;

/// Live-session cache shared by every request.
///
/// For a single session id, a `lookup` that starts after `remove` or `clear`
/// returned must observe absence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, id: SessionId, credentials: Credentials);
    async fn lookup(&self, id: &SessionId) -> Option<Credentials>;
    /// Returns whether an entry was present.
    async fn remove(&self, id: &SessionId) -> bool;
    async fn clear(&self);
    async fn len(&self) -> usize;
    /// Drops entries past their idle limit; returns how many were dropped.
    async fn evict_expired(&self) -> usize {
        0
    }
}
