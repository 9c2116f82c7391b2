//! Classification attached to every registered code.

use serde::{Deserialize, Serialize};

/// Broad failure family. Renderers branch on this, not on the code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Auth,
    RateLimit,
    BadRequest,
    Schema,
    NotFound,
    Conflict,
    Storage,
    Provider,
    Unknown,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Auth => "Auth",
            ErrorKind::RateLimit => "RateLimit",
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::Schema => "Schema",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Storage => "Storage",
            ErrorKind::Provider => "Provider",
            ErrorKind::Unknown => "Unknown",
        }
    }

    /// Caller mistakes rather than faults on our side.
    pub const fn is_client_fault(self) -> bool {
        matches!(
            self,
            ErrorKind::Auth
                | ErrorKind::RateLimit
                | ErrorKind::BadRequest
                | ErrorKind::Schema
                | ErrorKind::NotFound
                | ErrorKind::Conflict
        )
    }
}

/// Whether repeating the same call can succeed. Denials never are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryClass {
    Transient,
    Permanent,
}

impl RetryClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            RetryClass::Transient => "transient",
            RetryClass::Permanent => "permanent",
        }
    }

    pub const fn is_retryable(self) -> bool {
        matches!(self, RetryClass::Transient)
    }
}

/// Ordered from least to most urgent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warn,
    Error,
    Critical,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_faults() {
        assert!(ErrorKind::Auth.is_client_fault());
        assert!(ErrorKind::NotFound.is_client_fault());
        assert!(!ErrorKind::Storage.is_client_fault());
        assert!(!ErrorKind::Unknown.is_client_fault());
    }

    #[test]
    fn severity_orders_by_urgency() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Error < Severity::Critical);
    }
}
