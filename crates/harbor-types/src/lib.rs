//! Data contract primitives for the SafeHarbor access-control core.
//!
//! Everything here is plain data: identifiers for persisted objects, login
//! names and sessions, the credentials a caller presents, and the ephemeral
//! session token produced once those credentials are accepted.

pub mod credentials;
pub mod id;
pub mod prelude;
pub mod time;
pub mod validate;
