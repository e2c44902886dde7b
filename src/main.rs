use anyhow::Result;
use orderbot::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
