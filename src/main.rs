use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    safeharbor_cli::cli::app::run().await
}
