use harbor_types::prelude::SessionId;

use crate::config::SessionPolicy;

/// Carries the session id between requests as an HTTP-only cookie.
#[derive(Clone, Debug)]
pub struct SessionCookie {
    name: String,
    max_age_secs: u64,
    secure: bool,
}

impl SessionCookie {
    pub fn new(policy: &SessionPolicy) -> Self {
        Self {
            name: policy.cookie_name.clone(),
            max_age_secs: policy.max_age_secs,
            secure: policy.secure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value for a `Set-Cookie` response header.
    pub fn render(&self, id: &SessionId) -> String {
        let mut header = format!(
            "{}={}; Max-Age={}; HttpOnly",
            self.name,
            id.as_str(),
            self.max_age_secs
        );
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }

    /// Session id from a `Cookie` request header. Missing or empty is `None`.
    pub fn extract(&self, cookie_header: Option<&str>) -> Option<SessionId> {
        cookie_header?
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| name.trim() == self.name)
            .map(|(_, value)| value.trim().trim_matches('"'))
            .filter(|value| !value.is_empty())
            .map(SessionId::from)
    }
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self::new(&SessionPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_reference_attributes() {
        let cookie = SessionCookie::default();
        assert_eq!(
            cookie.render(&SessionId::new("5:ab")),
            "SessionId=5:ab; Max-Age=86400; HttpOnly"
        );
        let secure = SessionCookie::new(&SessionPolicy {
            secure: true,
            ..SessionPolicy::default()
        });
        assert!(secure.render(&SessionId::new("5:ab")).ends_with("; Secure"));
    }

    #[test]
    fn extracts_among_other_cookies() {
        let cookie = SessionCookie::default();
        let header = "theme=dark; SessionId=12:beef ; lang=en";
        assert_eq!(cookie.extract(Some(header)), Some(SessionId::new("12:beef")));
    }

    #[test]
    fn absent_or_empty_cookie_is_none() {
        let cookie = SessionCookie::default();
        assert_eq!(cookie.extract(None), None);
        assert_eq!(cookie.extract(Some("theme=dark")), None);
        assert_eq!(cookie.extract(Some("SessionId=")), None);
    }
}
