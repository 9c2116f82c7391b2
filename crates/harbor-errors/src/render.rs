use std::collections::BTreeMap;

use crate::labels::labels;
use crate::model::{CauseEntry, ErrorObj};
use serde::Serialize;
use serde_json::{Map, Value};

/// What a client is allowed to see: no developer detail, no metadata.
#[derive(Debug, Serialize)]
pub struct PublicErrorView {
    pub status: u16,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

/// Everything, for logs and audit sinks.
#[derive(Debug, Serialize)]
pub struct AuditErrorView {
    pub labels: BTreeMap<&'static str, String>,
    pub http_status: u16,
    pub message_user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_dev: Option<String>,
    pub meta: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<CauseEntry>,
}

impl ErrorObj {
    pub fn to_public(&self) -> PublicErrorView {
        PublicErrorView {
            status: self.http_status,
            code: self.code.0,
            message: self.message_user.clone(),
            correlation_id: self.correlation_id.clone(),
        }
    }

    pub fn to_audit(&self) -> AuditErrorView {
        AuditErrorView {
            labels: labels(self),
            http_status: self.http_status,
            message_user: self.message_user.clone(),
            message_dev: self.message_dev.clone(),
            meta: self.meta.clone(),
            causes: self.causes.clone(),
        }
    }
}
