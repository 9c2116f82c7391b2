use anyhow::{bail, Result};
use clap::Args;
use harbor_auth::prelude::SessionCookie;
use harbor_types::prelude::{Credentials, SessionId};
use serde::Serialize;

use super::context::CliContext;
use super::output::{emit, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct MintSessionArgs {
    /// Login id the session is minted for
    #[arg(long)]
    pub user: String,
}

#[derive(Args, Clone, Debug)]
pub struct VerifySessionArgs {
    /// Session id as carried in the cookie
    #[arg(value_name = "SESSION_ID")]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
struct MintedSession {
    session_id: String,
    user_id: String,
    set_cookie: String,
}

#[derive(Debug, Serialize)]
struct SessionCheck {
    session_id: String,
    valid: bool,
}

/// Mints an id the same way a login does. No password is checked and the
/// session lives only as long as this process.
pub async fn cmd_mint_session(
    args: MintSessionArgs,
    ctx: &CliContext,
    output: OutputFormat,
) -> Result<()> {
    let credentials = ctx.credential_service()?;
    let cookie = SessionCookie::new(&ctx.config().session_policy()?);
    let token = credentials
        .create_session(Credentials::new(args.user, String::new()))
        .await;

    let minted = MintedSession {
        session_id: token.session_id.to_string(),
        user_id: token.user_id.to_string(),
        set_cookie: cookie.render(&token.session_id),
    };
    emit(&output, &minted, |m| {
        format!("{}\nSet-Cookie: {}", m.session_id, m.set_cookie)
    })
}

/// Cryptographic check only; says nothing about whether any process still
/// has the session cached.
pub async fn cmd_verify_session(
    args: VerifySessionArgs,
    ctx: &CliContext,
    output: OutputFormat,
) -> Result<()> {
    let credentials = ctx.credential_service()?;
    let valid = credentials.session_id_is_valid(&SessionId::new(args.session_id.trim()));
    let check = SessionCheck {
        session_id: args.session_id,
        valid,
    };
    emit(&output, &check, |c| {
        if c.valid { "valid" } else { "invalid" }.to_string()
    })?;
    if !valid {
        bail!("session id failed verification");
    }
    Ok(())
}
