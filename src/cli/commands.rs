use clap::Subcommand;

use super::check::CheckArgs;
use super::password::HashPasswordArgs;
use super::session::{MintSessionArgs, VerifySessionArgs};
use super::signature::SignatureArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Print the salted digest of a password
    HashPassword(HashPasswordArgs),

    /// Mint a session id and print its Set-Cookie header
    MintSession(MintSessionArgs),

    /// Check a session id against the configured salt
    VerifySession(VerifySessionArgs),

    /// Load a seed, log a user in and authorize one action
    Check(CheckArgs),

    /// Print the unsalted SHA-512 signature of a file
    Signature(SignatureArgs),
}
