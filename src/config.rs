use std::path::PathBuf;
use std::time::Duration;

use harbor_auth::config::{DEFAULT_COOKIE_MAX_AGE_SECS, DEFAULT_COOKIE_NAME};
use harbor_auth::prelude::{LoginPolicy, SessionPolicy};
use harbor_errors::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Environment variable that overrides `secret_salt`.
pub const SALT_ENV: &str = "SAFEHARBOR_SECRET_SALT";

#[derive(Debug, Error)]
#[error("{}", render(.0))]
pub struct ConfigError(pub Box<ErrorObj>);

impl ConfigError {
    pub fn invalid(field: &str, msg: &str) -> Self {
        ConfigError(Box::new(
            ErrorBuilder::new(codes::SCHEMA_VALIDATION)
                .user_msg(format!("invalid configuration: {field}"))
                .dev_msg(msg)
                .meta_kv("field", json!(field))
                .build(),
        ))
    }

    pub fn into_inner(self) -> ErrorObj {
        *self.0
    }
}

fn render(obj: &ErrorObj) -> String {
    match &obj.message_dev {
        Some(dev) => format!("{} ({})", obj.message_user, dev),
        None => obj.message_user.clone(),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service_name: String,
    /// Process-wide salt for password digests and session ids. Never logged.
    #[serde(skip_serializing)]
    pub secret_salt: String,
    /// Development switch for the gate's per-handler authorization.
    pub authorize: bool,
    pub session: SessionConfig,
    pub login: LoginConfig,
    pub seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "safeharbor".to_string(),
            secret_salt: String::new(),
            authorize: true,
            session: SessionConfig::default(),
            login: LoginConfig::default(),
            seed_path: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub max_age_secs: u64,
    pub secure: bool,
    /// Humantime duration; absent or `never` keeps idle sessions forever.
    pub idle_ttl: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            max_age_secs: DEFAULT_COOKIE_MAX_AGE_SECS,
            secure: false,
            idle_ttl: Some("30m".to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    pub max_failures: Option<u32>,
    pub window: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            max_failures: None,
            window: "15m".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_salt.is_empty() {
            return Err(ConfigError::invalid(
                "secret_salt",
                &format!("secret_salt must be set in the config file or via {SALT_ENV}"),
            ));
        }
        let cookie = &self.session.cookie_name;
        if cookie.is_empty()
            || cookie
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, ';' | '=' | ','))
        {
            return Err(ConfigError::invalid(
                "session.cookie_name",
                &format!("'{cookie}' is not a valid cookie name"),
            ));
        }
        if self.session.max_age_secs == 0 {
            return Err(ConfigError::invalid(
                "session.max_age_secs",
                "cookie max age must be positive",
            ));
        }
        if self.login.max_failures == Some(0) {
            return Err(ConfigError::invalid(
                "login.max_failures",
                "a limit of zero would block every login; omit it to disable enforcement",
            ));
        }
        self.session_policy()?;
        self.login_policy()?;
        Ok(())
    }

    pub fn session_policy(&self) -> Result<SessionPolicy, ConfigError> {
        Ok(SessionPolicy {
            cookie_name: self.session.cookie_name.clone(),
            max_age_secs: self.session.max_age_secs,
            secure: self.session.secure,
            idle_ttl: parse_ttl("session.idle_ttl", self.session.idle_ttl.as_deref())?,
        })
    }

    pub fn login_policy(&self) -> Result<LoginPolicy, ConfigError> {
        let window = humantime::parse_duration(&self.login.window).map_err(|err| {
            ConfigError::invalid("login.window", &format!("{}: {err}", self.login.window))
        })?;
        Ok(LoginPolicy {
            max_failures: self.login.max_failures,
            window,
        })
    }
}

/// `None` and `never` both mean no expiry.
pub fn parse_ttl(field: &str, raw: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    let Some(ttl) = raw.map(str::trim) else {
        return Ok(None);
    };
    if ttl.eq_ignore_ascii_case("never") {
        return Ok(None);
    }
    let duration = humantime::parse_duration(ttl)
        .map_err(|_| ConfigError::invalid(field, &format!("invalid ttl format: {ttl}")))?;
    if duration.is_zero() {
        return Err(ConfigError::invalid(field, "ttl must be positive"));
    }
    Ok(Some(duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salted() -> Config {
        Config {
            secret_salt: "pepper".into(),
            ..Config::default()
        }
    }

    #[test]
    fn defaults_need_a_salt() {
        let err = Config::default().validate().unwrap_err();
        assert_eq!(err.0.code, codes::SCHEMA_VALIDATION);
        assert!(err.to_string().contains(SALT_ENV));
        salted().validate().unwrap();
    }

    #[test]
    fn yaml_fills_missing_sections() {
        let config: Config = serde_yaml::from_str(
            "secret_salt: abc\nsession:\n  idle_ttl: never\nlogin:\n  max_failures: 3\n",
        )
        .unwrap();
        assert_eq!(config.session.cookie_name, "SessionId");
        assert_eq!(config.session.max_age_secs, 86_400);
        assert!(config.authorize);

        let session = config.session_policy().unwrap();
        assert_eq!(session.idle_ttl, None);
        let login = config.login_policy().unwrap();
        assert_eq!(login.max_failures, Some(3));
        assert_eq!(login.window, Duration::from_secs(900));
    }

    #[test]
    fn default_idle_ttl_is_thirty_minutes() {
        let policy = salted().session_policy().unwrap();
        assert_eq!(policy.idle_ttl, Some(Duration::from_secs(30 * 60)));
    }

    #[test]
    fn ttl_parsing() {
        assert_eq!(parse_ttl("t", None).unwrap(), None);
        assert_eq!(parse_ttl("t", Some("NEVER")).unwrap(), None);
        assert_eq!(
            parse_ttl("t", Some("90s")).unwrap(),
            Some(Duration::from_secs(90))
        );
        assert!(parse_ttl("t", Some("soon")).is_err());
        assert!(parse_ttl("t", Some("0s")).is_err());
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = salted();
        config.session.cookie_name = "Session Id".into();
        assert!(config.validate().is_err());

        let mut config = salted();
        config.login.max_failures = Some(0);
        assert!(config.validate().is_err());

        let mut config = salted();
        config.login.window = "fortnightly-ish".into();
        let err = config.validate().unwrap_err();
        assert_eq!(err.0.meta["field"], json!("login.window"));
    }

    #[test]
    fn salt_is_not_serialized() {
        let rendered = serde_yaml::to_string(&salted()).unwrap();
        assert!(!rendered.contains("pepper"));
    }
}
