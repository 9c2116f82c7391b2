use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the nonce half of a session id.
pub trait NonceSource: Send + Sync {
    fn next_nonce(&self) -> u64;
}

/// Nanosecond wall-clock nonces, forced strictly increasing within the process.
#[derive(Debug, Default)]
pub struct ClockNonce {
    last: AtomicU64,
}

impl ClockNonce {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_nanos() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

impl NonceSource for ClockNonce {
    fn next_nonce(&self) -> u64 {
        let now = Self::now_nanos();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}
