pub mod compare;
pub mod digest;
pub mod errors;
pub mod nonce;
pub mod prelude;
pub mod signature;

pub use compare::constant_time_eq;
pub use digest::{Digest, SaltedDigester};
pub use errors::CryptoError;
pub use nonce::{ClockNonce, NonceSource};
pub use signature::{file_signature, reader_signature};
