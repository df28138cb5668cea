//! Error types for a single archive call.
//!
//! This module defines the central `Error` enum, which captures every failure
//! mode of the streaming archive lifecycle, in the order they can occur:
//!
//! ## Error Cases
//! - `UnreadableInput`: a source file could not be opened or read. Raised
//!   before any network activity.
//! - `ChannelUnavailable`: the gRPC channel could not be established.
//! - `StreamTransmission`: the request stream was torn down before the full
//!   sequence was delivered.
//! - `RemoteProcessing`: the server terminated the call with an error status
//!   instead of a response.
//! - `ArtifactWrite`: persisting the response locally failed. Fatal, even
//!   though the remote work succeeded.
//! - `ArtifactRemoval`: scheduled cleanup of the artifact failed. Reportable
//!   but never fatal; the artifact already served its purpose.
//!
//! None of these are retried internally. Every variant except
//! `ArtifactRemoval` aborts the call.

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the archive call lifecycle.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A source file could not be opened or read.
    #[error("Unreadable input `{path}`: {source}")]
    UnreadableInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The gRPC channel to the archiver could not be established.
    #[error("Channel unavailable at `{endpoint}`: {source}")]
    ChannelUnavailable {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// The request stream closed before the full sequence was delivered.
    #[error("Stream transmission failed: {context}")]
    StreamTransmission { context: String },

    /// The server reported an error instead of a terminal response.
    #[error("Remote processing failed: {0}")]
    RemoteProcessing(#[from] tonic::Status),

    /// The response could not be persisted to the artifact file.
    #[error("Artifact write failed for `{}`: {source}", .path.display())]
    ArtifactWrite {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact could not be removed after its observation window.
    #[error("Artifact removal failed for `{}`: {source}", .path.display())]
    ArtifactRemoval {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
