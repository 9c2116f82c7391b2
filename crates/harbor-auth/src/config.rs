use std::time::Duration;

pub const DEFAULT_COOKIE_NAME: &str = "SessionId";
pub const DEFAULT_COOKIE_MAX_AGE_SECS: u64 = 86_400;

/// How session ids travel and how long idle sessions survive in the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionPolicy {
    pub cookie_name: String,
    pub max_age_secs: u64,
    pub secure: bool,
    /// `None` keeps sessions until logout or a bulk clear.
    pub idle_ttl: Option<Duration>,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            max_age_secs: DEFAULT_COOKIE_MAX_AGE_SECS,
            secure: false,
            idle_ttl: None,
        }
    }
}

/// Login attempt limiting. Attempts are always recorded; they only block
/// logins when `max_failures` is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginPolicy {
    pub max_failures: Option<u32>,
    pub window: Duration,
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self {
            max_failures: None,
            window: Duration::from_secs(15 * 60),
        }
    }
}
