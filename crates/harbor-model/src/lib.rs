//! Access-control data model for SafeHarbor.
//!
//! Resources form an ownership tree rooted at realms; parties (users and
//! groups) hold permissions on resources through ACL entries. The
//! authorization engine reads this model only through [`store::AccessStore`].

pub mod acl;
pub mod errors;
pub mod mask;
pub mod memory;
pub mod names;
pub mod party;
pub mod prelude;
pub mod resource;
pub mod store;
