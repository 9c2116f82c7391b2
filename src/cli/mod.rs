pub mod app;
pub mod check;
pub mod commands;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod output;
pub mod password;
pub mod runtime;
pub mod session;
pub mod signature;

pub use check::{cmd_check, CheckArgs};
pub use password::{cmd_hash_password, HashPasswordArgs};
pub use session::{cmd_mint_session, cmd_verify_session, MintSessionArgs, VerifySessionArgs};
pub use signature::{cmd_signature, SignatureArgs};
