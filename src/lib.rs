//! SafeHarbor access-control core: configuration, seed fixtures and the
//! `safeharbor` command line.
//!
//! The domain lives in the `harbor-*` crates; this package wires them
//! together the way a server process would.

pub mod cli;
pub mod config;
pub mod seed;

pub use config::{Config, ConfigError};
pub use seed::{SeedFile, SeedIndex};
