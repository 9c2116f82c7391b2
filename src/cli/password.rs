use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use super::context::CliContext;
use super::output::{emit, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct HashPasswordArgs {
    /// Cleartext password (prefer --stdin to keep it out of shell history)
    #[arg(long, conflicts_with = "stdin")]
    pub password: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long)]
    pub stdin: bool,

    /// Compare against a stored digest instead of printing one
    #[arg(long, value_name = "DIGEST")]
    pub verify: Option<String>,
}

#[derive(Debug, Serialize)]
struct HashReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<bool>,
}

pub async fn cmd_hash_password(
    args: HashPasswordArgs,
    ctx: &CliContext,
    output: OutputFormat,
) -> Result<()> {
    let password = match (args.password, args.stdin) {
        (Some(password), _) => password,
        (None, true) => read_stdin_line()?,
        (None, false) => bail!("pass --password or --stdin"),
    };
    let credentials = ctx.credential_service()?;

    let report = match args.verify {
        Some(stored) => HashReport {
            digest: None,
            matches: Some(credentials.verify_password(&password, stored.trim())),
        },
        None => HashReport {
            digest: Some(credentials.hash_password(&password)),
            matches: None,
        },
    };
    emit(&output, &report, |r| match (&r.digest, r.matches) {
        (Some(digest), _) => digest.clone(),
        (None, Some(true)) => "match".to_string(),
        _ => "mismatch".to_string(),
    })?;

    if report.matches == Some(false) {
        bail!("password does not match digest");
    }
    Ok(())
}

fn read_stdin_line() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
