use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use harbor_errors::prelude::codes;
use harbor_model::prelude::{InMemoryAccessStore, Permission, PermissionMask};
use harbor_types::prelude::Credentials;
use serde::Serialize;
use tracing::info;

use super::context::CliContext;
use super::output::{auth_failure, emit, OutputFormat};
use crate::seed::SeedFile;

#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// Seed fixture to load (defaults to `seed_path` from the config)
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Login id
    #[arg(long)]
    pub user: String,

    /// Cleartext password
    #[arg(long)]
    pub password: String,

    /// One of Create, Read, Write, Execute, Delete
    #[arg(long)]
    pub action: Permission,

    /// Resource path such as `realm/repo/image`, or `user:<login>`
    #[arg(long)]
    pub resource: String,

    /// Handler name used in the denial message
    #[arg(long)]
    pub handler: Option<String>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    user: String,
    resource: String,
    action: Permission,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Runs one request through the gate: login, cookie round trip, session
/// check, then the handler authorization guard.
pub async fn cmd_check(args: CheckArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let seed_path = args
        .seed
        .clone()
        .or_else(|| ctx.config().seed_path.clone())
        .context("No seed file: pass --seed or set seed_path in the config")?;

    let credentials = ctx.credential_service()?;
    let store = InMemoryAccessStore::new();
    let seed = SeedFile::load(&seed_path)
        .await
        .with_context(|| format!("Failed to load seed {}", seed_path.display()))?;
    let index = seed.apply(&store, &credentials)?;
    let resource_id = index.target(&args.resource)?.clone();
    let gate = ctx.gate(store, credentials)?;

    let token = gate
        .login(Credentials::new(args.user.clone(), args.password.clone()))
        .await
        .map_err(auth_failure)?;

    let set_cookie = gate.set_cookie_header(&token);
    let cookie_pair = set_cookie.split(';').next().unwrap_or_default();
    let request_token = gate
        .authenticate_request_cookie(Some(cookie_pair))
        .await
        .ok_or_else(|| anyhow!("session cookie was not recognised"))?;
    gate.authenticate_session(Some(&request_token))
        .await
        .map_err(auth_failure)?;

    let handler = args
        .handler
        .clone()
        .unwrap_or_else(|| args.action.as_str().to_lowercase());
    let mask = PermissionMask::single(args.action).bits();
    let outcome = gate
        .authorize_handler_action(&request_token, &mask, &resource_id, &handler)
        .await;

    let report = match outcome {
        Ok(()) => CheckReport {
            user: args.user,
            resource: args.resource,
            action: args.action,
            allowed: true,
            reason: None,
        },
        Err(err) if err.code() == codes::AUTH_FORBIDDEN => CheckReport {
            user: args.user,
            resource: args.resource,
            action: args.action,
            allowed: false,
            reason: Some(err.user_message().to_string()),
        },
        Err(err) => return Err(auth_failure(err)),
    };
    info!(allowed = report.allowed, resource = %report.resource, "check finished");

    emit(&output, &report, |r| match (&r.reason, r.allowed) {
        (_, true) => "allowed".to_string(),
        (Some(reason), false) => format!("denied: {reason}"),
        (None, false) => "denied".to_string(),
    })
}
