use super::check::cmd_check;
use super::env::CliArgs;
use super::password::cmd_hash_password;
use super::session::{cmd_mint_session, cmd_verify_session};
use super::signature::cmd_signature;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::HashPassword(args) => cmd_hash_password(args, ctx, cli.output.clone()).await,
        Commands::MintSession(args) => cmd_mint_session(args, ctx, cli.output.clone()).await,
        Commands::VerifySession(args) => cmd_verify_session(args, ctx, cli.output.clone()).await,
        Commands::Check(args) => cmd_check(args, ctx, cli.output.clone()).await,
        Commands::Signature(args) => cmd_signature(args, cli.output.clone()).await,
    }
}
