pub use crate::authn::local::LocalPasswordAuthenticator;
pub use crate::authn::remote::{IdentityClient, RemoteAuthenticator};
pub use crate::authn::{AuthnOutcome, Authenticator};
pub use crate::config::{LoginPolicy, SessionPolicy};
pub use crate::cookie::SessionCookie;
pub use crate::credential::CredentialService;
pub use crate::errors::AuthError;
pub use crate::events::AuthDecisionEvent;
pub use crate::gate::AccessGate;
pub use crate::pdp::acl::AclAuthorizer;
pub use crate::pdp::{Authorizer, Decision, Grant, GrantPath};
pub use crate::session::memory::MemorySessionStore;
pub use crate::session::SessionStore;
