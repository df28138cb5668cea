use clap::Parser;
use zipline_tonic_client::client;
use zipline_tonic_client::client::config::{CliArgs, ClientConfig};
use zipline_tonic_client::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ClientConfig::try_from(args)?;

    init_telemetry();

    client::run(&config).await?;
    Ok(())
}
