use crate::class::{ErrorKind, RetryClass, Severity};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub &'static str);

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // Known codes resolve to their static name; unknown ones are interned.
        match REGISTRY.get_key_value(s.as_str()) {
            Some((key, _)) => Ok(ErrorCode(*key)),
            None => Ok(ErrorCode(Box::leak(s.into_boxed_str()))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CodeSpec {
    pub code: ErrorCode,
    pub kind: ErrorKind,
    pub http_status: u16,
    pub retryable: RetryClass,
    pub severity: Severity,
    pub default_user_msg: &'static str,
}

pub mod codes {
    use super::ErrorCode;

    pub const AUTH_UNAUTHENTICATED: ErrorCode = ErrorCode("AUTH.UNAUTHENTICATED");
    pub const AUTH_INVALID_SESSION: ErrorCode = ErrorCode("AUTH.INVALID_SESSION");
    pub const AUTH_IDENTITY_UNRESOLVED: ErrorCode = ErrorCode("AUTH.IDENTITY_UNRESOLVED");
    pub const AUTH_FORBIDDEN: ErrorCode = ErrorCode("AUTH.FORBIDDEN");
    pub const AUTH_TOO_MANY_ATTEMPTS: ErrorCode = ErrorCode("AUTH.TOO_MANY_ATTEMPTS");
    pub const REQUEST_INVALID_ACTION_MASK: ErrorCode = ErrorCode("REQUEST.INVALID_ACTION_MASK");
    pub const SCHEMA_VALIDATION: ErrorCode = ErrorCode("SCHEMA.VALIDATION_FAILED");
    pub const STORAGE_NOT_FOUND: ErrorCode = ErrorCode("STORAGE.NOT_FOUND");
    pub const STORAGE_CONFLICT: ErrorCode = ErrorCode("STORAGE.CONFLICT");
    pub const STORAGE_UNAVAILABLE: ErrorCode = ErrorCode("STORAGE.UNAVAILABLE");
    pub const PROVIDER_UNAVAILABLE: ErrorCode = ErrorCode("PROVIDER.UNAVAILABLE");
    pub const UNKNOWN_INTERNAL: ErrorCode = ErrorCode("UNKNOWN.INTERNAL");
}

impl CodeSpec {
    const fn new(
        code: ErrorCode,
        kind: ErrorKind,
        http_status: u16,
        retryable: RetryClass,
        severity: Severity,
        default_user_msg: &'static str,
    ) -> Self {
        Self {
            code,
            kind,
            http_status,
            retryable,
            severity,
            default_user_msg,
        }
    }
}

/// Profile used for codes that were never registered.
pub static FALLBACK: CodeSpec = CodeSpec::new(
    codes::UNKNOWN_INTERNAL,
    ErrorKind::Unknown,
    500,
    RetryClass::Transient,
    Severity::Critical,
    "Internal error. Please retry later.",
);

const SPECS: &[CodeSpec] = {
    use codes::*;
    use ErrorKind as K;
    use RetryClass::{Permanent, Transient};
    use Severity::{Error, Info, Warn};

    &[
        CodeSpec::new(AUTH_UNAUTHENTICATED, K::Auth, 401, Permanent, Warn, "Unauthenticated"),
        CodeSpec::new(AUTH_INVALID_SESSION, K::Auth, 401, Permanent, Warn, "Invalid session Id"),
        CodeSpec::new(
            AUTH_IDENTITY_UNRESOLVED,
            K::Auth,
            401,
            Permanent,
            Warn,
            "User could not be identified.",
        ),
        CodeSpec::new(
            AUTH_FORBIDDEN,
            K::Auth,
            403,
            Permanent,
            Warn,
            "You don't have permission to perform this action.",
        ),
        CodeSpec::new(
            AUTH_TOO_MANY_ATTEMPTS,
            K::RateLimit,
            429,
            Transient,
            Warn,
            "Too many failed login attempts. Please retry later.",
        ),
        CodeSpec::new(
            REQUEST_INVALID_ACTION_MASK,
            K::BadRequest,
            400,
            Permanent,
            Warn,
            "Exactly one action must be requested.",
        ),
        CodeSpec::new(
            SCHEMA_VALIDATION,
            K::Schema,
            422,
            Permanent,
            Warn,
            "Your request is invalid. Please check inputs.",
        ),
        CodeSpec::new(STORAGE_NOT_FOUND, K::NotFound, 404, Permanent, Info, "Resource not found."),
        CodeSpec::new(
            STORAGE_CONFLICT,
            K::Conflict,
            409,
            Permanent,
            Warn,
            "The object already exists.",
        ),
        CodeSpec::new(
            STORAGE_UNAVAILABLE,
            K::Storage,
            503,
            Transient,
            Error,
            "Storage backend is unavailable. Please retry later.",
        ),
        CodeSpec::new(
            PROVIDER_UNAVAILABLE,
            K::Provider,
            503,
            Transient,
            Error,
            "Identity provider is unavailable. Please retry later.",
        ),
    ]
};

/// Code name to profile. Built once; a duplicate name is a programming error.
pub static REGISTRY: Lazy<HashMap<&'static str, CodeSpec>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(SPECS.len() + 1);
    for spec in SPECS.iter().chain(std::iter::once(&FALLBACK)) {
        let previous = map.insert(spec.code.0, spec.clone());
        assert!(previous.is_none(), "duplicate error code: {}", spec.code.0);
    }
    map
});

pub fn spec_of(code: ErrorCode) -> Option<&'static CodeSpec> {
    REGISTRY.get(code.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_is_registered() {
        for code in [
            codes::AUTH_UNAUTHENTICATED,
            codes::AUTH_INVALID_SESSION,
            codes::AUTH_IDENTITY_UNRESOLVED,
            codes::AUTH_FORBIDDEN,
            codes::AUTH_TOO_MANY_ATTEMPTS,
            codes::REQUEST_INVALID_ACTION_MASK,
            codes::SCHEMA_VALIDATION,
            codes::STORAGE_NOT_FOUND,
            codes::STORAGE_CONFLICT,
            codes::STORAGE_UNAVAILABLE,
            codes::PROVIDER_UNAVAILABLE,
            codes::UNKNOWN_INTERNAL,
        ] {
            assert!(spec_of(code).is_some(), "{} missing", code.0);
        }
    }

    #[test]
    fn unregistered_code_has_no_spec() {
        assert!(spec_of(ErrorCode("NOPE.NOTHING")).is_none());
    }
}
