//! # Common Archive Protocol Types and Constants
//!
//! Type aliases and constants shared by every participant in the archive
//! protocol. These pin down the contract between the sequencing, streaming,
//! and disposal stages without leaking generated prost names everywhere.
//!
//! ## Type Aliases
//!
//! - [`FileUnit`] - one file's identifier and payload, as transmitted on the
//!   outbound stream
//! - [`OutboundSequence`] - the ordered sequence of units for one call
//! - [`ArchiveResult`] - the single aggregated response for one call
//!
//! ## Constants
//!
//! - [`DEFAULT_ENDPOINT`] - conventional archiver service address
//! - [`DEFAULT_ARTIFACT_NAME`] - conventional artifact file name
//! - [`STREAM_BUFFER_SIZE`] - request-stream channel depth

use crate::proto::{ZipRequest, ZipResponse};

/// One file's name and raw contents, sent as a single message on the
/// outbound request stream.
pub type FileUnit = ZipRequest;

/// The ordered outbound sequence for a single call. Transmission order
/// matches construction order; the sequence is built once and not reused.
pub type OutboundSequence = Vec<FileUnit>;

/// The server's single aggregated response. Exactly one exists per
/// successful call, and it is fully formed when observed.
pub type ArchiveResult = ZipResponse;

/// Conventional address of the archiver service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Conventional name for the locally persisted archive.
pub const DEFAULT_ARTIFACT_NAME: &str = "compressed.zip";

/// Number of request units buffered between the feeder and the gRPC request
/// stream. Lower values increase backpressure responsiveness; higher values
/// enable deeper pipelining.
pub const STREAM_BUFFER_SIZE: usize = 8;
