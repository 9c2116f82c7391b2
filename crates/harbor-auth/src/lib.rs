//! Authentication, sessions and ACL authorization for SafeHarbor.
//!
//! [`AccessGate`] is the entry point request handlers use. It combines the
//! [`CredentialService`](credential::CredentialService), an
//! [`Authenticator`](authn::Authenticator) and an
//! [`Authorizer`](pdp::Authorizer).

pub mod authn;
pub mod config;
pub mod cookie;
pub mod credential;
pub mod errors;
pub mod events;
pub mod gate;
pub mod pdp;
pub mod prelude;
pub mod session;

pub use gate::AccessGate;
