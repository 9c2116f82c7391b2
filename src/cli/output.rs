use anyhow::{anyhow, Result};
use clap::ValueEnum;
use harbor_auth::prelude::AuthError;
use harbor_errors::prelude::labels;
use serde::Serialize;

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Yaml,
}

/// Prints `value` in the chosen format; `human` renders the plain-text form.
pub fn emit<T: Serialize>(
    format: &OutputFormat,
    value: &T,
    human: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Human => println!("{}", human(value)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}

/// Keeps what a client would see; the audit view goes to the log.
pub fn auth_failure(err: AuthError) -> anyhow::Error {
    let obj = err.into_inner();
    tracing::debug!(labels = ?labels(&obj), audit = ?obj.to_audit(), "auth failure");
    let public = obj.to_public();
    anyhow!("{} ({}): {}", public.code, public.status, public.message)
}
