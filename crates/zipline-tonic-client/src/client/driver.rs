//! Streaming call driver: one client-streaming invocation per call.
//!
//! The call is an explicit two-phase protocol. A feeder task pushes the
//! outbound sequence into a bounded channel in construction order and drops
//! the sender to signal end-of-stream; the invocation task consumes the
//! channel as its request stream and resolves with the single terminal
//! response. No per-message acknowledgment exists, and the unit of success
//! or failure is the entire call.

use tokio::{sync::mpsc, task::JoinHandle};
use tokio_stream::wrappers::ReceiverStream;
use tonic::transport::{Channel, Endpoint};
use zipline_tonic_core::{
    Error, Result,
    proto::{ZipResponse, archiver_client::ArchiverClient},
    types::{ArchiveResult, OutboundSequence, STREAM_BUFFER_SIZE},
};

/// Establishes the channel to the archiver.
///
/// A refused or unreachable endpoint surfaces as
/// [`Error::ChannelUnavailable`]; no retry is attempted here.
pub async fn connect(endpoint: &str) -> Result<ArchiverClient<Channel>> {
    let target = Endpoint::from_shared(endpoint.to_owned()).map_err(|source| {
        Error::ChannelUnavailable {
            endpoint: endpoint.to_owned(),
            source,
        }
    })?;
    let channel = target
        .connect()
        .await
        .map_err(|source| Error::ChannelUnavailable {
            endpoint: endpoint.to_owned(),
            source,
        })?;
    tracing::debug!(endpoint = %endpoint, "channel established");
    Ok(ArchiverClient::new(channel))
}

/// Opens exactly one `Zip` invocation and feeds it the full sequence.
///
/// Returns immediately with a [`PendingArchive`]; transmission and
/// server-side processing proceed concurrently behind it.
pub fn start(mut client: ArchiverClient<Channel>, units: OutboundSequence) -> PendingArchive {
    let total = units.len();
    let (tx, rx) = mpsc::channel(STREAM_BUFFER_SIZE);

    let feeder = tokio::spawn(async move {
        for (sent, unit) in units.into_iter().enumerate() {
            let name = unit.file_name.clone();
            if tx.send(unit).await.is_err() {
                // The invocation tore down the receiver mid-stream.
                return Err(Error::StreamTransmission {
                    context: format!(
                        "request stream closed after {sent} of {total} units (next: {name})"
                    ),
                });
            }
            tracing::debug!(unit = %name, "unit transmitted");
        }
        // Dropping the sender half-closes the stream.
        Ok(())
    });

    let call = tokio::spawn(async move { client.zip(ReceiverStream::new(rx)).await });

    PendingArchive { feeder, call }
}

/// Deferred handle for the eventual terminal response of one invocation.
///
/// There is no cancellation path: once [`wait`](PendingArchive::wait) begins,
/// the only exits are the resolved response or a failure.
pub struct PendingArchive {
    feeder: JoinHandle<Result<()>>,
    call: JoinHandle<core::result::Result<tonic::Response<ZipResponse>, tonic::Status>>,
}

impl PendingArchive {
    /// Suspends until the server sends its terminal response or the call
    /// fails.
    ///
    /// A terminal error status is classified by the phase that broke: if the
    /// feeder could not deliver the full sequence the call failed in
    /// transmission ([`Error::StreamTransmission`]); otherwise the server
    /// rejected a fully delivered stream ([`Error::RemoteProcessing`]).
    pub async fn wait(self) -> Result<ArchiveResult> {
        let outcome = self.call.await.map_err(|err| Error::StreamTransmission {
            context: format!("invocation task failed: {err}"),
        })?;
        let fed = self.feeder.await.map_err(|err| Error::StreamTransmission {
            context: format!("feeder task failed: {err}"),
        })?;

        match outcome {
            Ok(response) => {
                // gRPC lets a server terminate a client stream early with a
                // valid response; the call still succeeded.
                if fed.is_err() {
                    tracing::warn!("server responded before consuming the full sequence");
                }
                Ok(response.into_inner())
            }
            Err(status) => match fed {
                Err(transmission) => Err(transmission),
                Ok(()) => Err(Error::RemoteProcessing(status)),
            },
        }
    }
}
