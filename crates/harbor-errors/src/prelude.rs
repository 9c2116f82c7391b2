pub use crate::{
    class::{ErrorKind, RetryClass, Severity},
    code::{codes, spec_of, CodeSpec, ErrorCode, REGISTRY},
    labels::labels,
    model::{CauseEntry, ErrorBuilder, ErrorObj},
    render::{AuditErrorView, PublicErrorView},
};
