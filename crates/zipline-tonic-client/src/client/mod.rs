//! Archive call orchestration.
//!
//! One invocation of [`run`] performs exactly one archive call:
//!
//! 1. [`sequencer`] reads every input file into an ordered outbound sequence
//!    (fail fast, before any network activity).
//! 2. [`driver`] connects the channel, opens a single client-streaming
//!    invocation, feeds it the full sequence, and hands back a deferred
//!    handle for the terminal response.
//! 3. [`disposer`] persists the response verbatim, announces it, and removes
//!    it after the configured observation window.
//!
//! Concurrent invocations are independent and share no mutable state, but
//! note that with the default fixed artifact name they race on the artifact
//! file itself (see [`config::CliArgs::unique_artifact`]).

pub mod config;
pub mod disposer;
pub mod driver;
pub mod sequencer;

use config::ClientConfig;
use disposer::Disposer;
use zipline_tonic_core::Result;

/// Runs one complete archive call against the configured endpoint.
///
/// The only suspension point visible to the caller is the wait on the
/// deferred response; transmission of the sequence and server-side
/// processing overlap behind it.
pub async fn run(config: &ClientConfig) -> Result<()> {
    let units = sequencer::read_units(&config.files).await?;
    tracing::info!(
        units = units.len(),
        endpoint = %config.endpoint,
        "streaming files to the archiver"
    );

    let client = driver::connect(&config.endpoint).await?;
    let pending = driver::start(client, units);
    let result = pending.wait().await?;

    let disposer = Disposer::new(config.artifact.clone(), config.linger);
    disposer.dispose(result).await
}
