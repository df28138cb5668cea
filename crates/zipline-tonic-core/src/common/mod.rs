//! Shared protocol surface: generated bindings, type aliases, and errors.

pub mod error;
pub mod types;

pub use error::{Error, Result};

pub mod proto {
    tonic::include_proto!("archiver");

    /// Encoded file descriptor set for the `archiver` package, for use with
    /// gRPC reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("archiver_descriptor");
}
