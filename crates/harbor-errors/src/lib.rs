//! Error domain shared by every SafeHarbor crate.
//!
//! Each failure carries a stable code from [`code::codes`]; the registry maps
//! that code to its kind, HTTP status, retry class and default user message so
//! callers at the request boundary can render responses without matching on
//! crate-specific error enums.

pub mod class;
pub mod code;
pub mod labels;
pub mod model;
pub mod prelude;
pub mod render;
