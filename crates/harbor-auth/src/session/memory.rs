use super::*;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct Entry {
    credentials: Credentials,
    last_access: Instant,
}

pub struct MemorySessionStore {
    idle_ttl: Option<Duration>,
    map: RwLock<HashMap<SessionId, Entry>>,
}

impl MemorySessionStore {
    pub fn new(idle_ttl: Option<Duration>) -> Self {
        Self {
            idle_ttl,
            map: RwLock::new(HashMap::new()),
        }
    }

    fn expired(&self, entry: &Entry, now: Instant) -> bool {
        match self.idle_ttl {
            Some(ttl) => now.saturating_duration_since(entry.last_access) > ttl,
            None => false,
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, id: SessionId, credentials: Credentials) {
        self.map.write().insert(
            id,
            Entry {
                credentials,
                last_access: Instant::now(),
            },
        );
    }

    async fn lookup(&self, id: &SessionId) -> Option<Credentials> {
        let now = Instant::now();
        let mut map = self.map.write();
        let entry = map.get_mut(id)?;
        if self.expired(entry, now) {
            map.remove(id);
            return None;
        }
        entry.last_access = now;
        Some(entry.credentials.clone())
    }

    async fn remove(&self, id: &SessionId) -> bool {
        self.map.write().remove(id).is_some()
    }

    async fn clear(&self) {
        self.map.write().clear();
    }

    async fn len(&self) -> usize {
        self.map.read().len()
    }

    async fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut map = self.map.write();
        let before = map.len();
        map.retain(|_, entry| !self.expired(entry, now));
        before - map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("alice", "pw")
    }

    #[tokio::test]
    async fn insert_lookup_remove() {
        let store = MemorySessionStore::default();
        let id = SessionId::new("1:aa");
        store.insert(id.clone(), creds()).await;
        assert_eq!(store.lookup(&id).await.map(|c| c.user_id.0), Some("alice".into()));
        assert!(store.remove(&id).await);
        assert!(store.lookup(&id).await.is_none());
        assert!(!store.remove(&id).await);
    }

    #[tokio::test]
    async fn idle_entries_expire() {
        let store = MemorySessionStore::new(Some(Duration::from_millis(20)));
        let id = SessionId::new("1:aa");
        store.insert(id.clone(), creds()).await;
        store.insert(SessionId::new("2:bb"), creds()).await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(store.lookup(&id).await.is_none());
        assert_eq!(store.evict_expired().await, 1);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn access_refreshes_idle_clock() {
        let store = MemorySessionStore::new(Some(Duration::from_millis(200)));
        let id = SessionId::new("1:aa");
        store.insert(id.clone(), creds()).await;
        for _ in 0..3 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            assert!(store.lookup(&id).await.is_some());
        }
    }
}
