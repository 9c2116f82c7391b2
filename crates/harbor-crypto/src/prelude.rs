pub use crate::compare::constant_time_eq;
pub use crate::digest::{Digest, SaltedDigester};
pub use crate::errors::CryptoError;
pub use crate::nonce::{ClockNonce, NonceSource};
pub use crate::signature::{file_signature, reader_signature};
