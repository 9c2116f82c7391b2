use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;
use harbor_crypto::file_signature;
use serde::Serialize;

use super::output::{emit, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct SignatureArgs {
    /// File to fingerprint
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
struct SignatureReport {
    path: PathBuf,
    signature: String,
}

/// Unsalted SHA-512 of the file content, reproducible across processes.
pub async fn cmd_signature(args: SignatureArgs, output: OutputFormat) -> Result<()> {
    let path = args.path.clone();
    let signature = tokio::task::spawn_blocking(move || file_signature(&path))
        .await?
        .map_err(|err| {
            let obj = err.into_inner();
            anyhow!(
                "{} ({})",
                obj.message_user,
                obj.message_dev.unwrap_or_default()
            )
        })?;
    emit(
        &output,
        &SignatureReport {
            path: args.path,
            signature,
        },
        |r| r.signature.clone(),
    )
}
