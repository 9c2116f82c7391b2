use crate::{
    class::{ErrorKind, RetryClass, Severity},
    code::{spec_of, CodeSpec, ErrorCode, FALLBACK},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One link in the chain of lower-level failures behind an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseEntry {
    pub code: String,
    pub summary: String,
}

impl CauseEntry {
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
        }
    }
}

/// The error every SafeHarbor crate wraps. Classification fields are copied
/// from the code's registry entry when the object is built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorObj {
    pub code: ErrorCode,
    pub kind: ErrorKind,
    pub message_user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_dev: Option<String>,
    pub http_status: u16,
    pub retryable: RetryClass,
    pub severity: Severity,
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<CauseEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl ErrorObj {
    pub fn is_retryable(&self) -> bool {
        self.retryable.is_retryable()
    }

    fn from_spec(code: ErrorCode, spec: &CodeSpec) -> Self {
        Self {
            code,
            kind: spec.kind,
            message_user: spec.default_user_msg.to_string(),
            message_dev: None,
            http_status: spec.http_status,
            retryable: spec.retryable,
            severity: spec.severity,
            meta: Map::new(),
            causes: Vec::new(),
            correlation_id: None,
        }
    }
}

/// Fluent construction. Unregistered codes keep their name but take the
/// internal-error profile.
pub struct ErrorBuilder(ErrorObj);

impl ErrorBuilder {
    pub fn new(code: ErrorCode) -> Self {
        let spec = spec_of(code).unwrap_or(&FALLBACK);
        ErrorBuilder(ErrorObj::from_spec(code, spec))
    }

    pub fn user_msg(mut self, message: impl Into<String>) -> Self {
        self.0.message_user = message.into();
        self
    }

    pub fn dev_msg(mut self, message: impl Into<String>) -> Self {
        self.0.message_dev = Some(message.into());
        self
    }

    pub fn meta_kv(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.meta.insert(key.into(), value);
        self
    }

    pub fn cause(mut self, cause: CauseEntry) -> Self {
        self.0.causes.push(cause);
        self
    }

    pub fn correlation(mut self, id: impl Into<String>) -> Self {
        self.0.correlation_id = Some(id.into());
        self
    }

    pub fn build(self) -> ErrorObj {
        self.0
    }
}
