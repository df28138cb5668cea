//! Generates the gRPC client and server bindings for `archiver.proto`.
//!
//! The `contents` and `zipped_contents` fields are explicitly mapped to the
//! `Bytes` type (from the `bytes` crate) instead of the default `Vec<u8>` so
//! payloads move through the codec without extra copies.

use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("archiver_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();

    // Ensure payload fields are treated as `Bytes`, not `Vec<u8>`
    config
        .bytes([
            ".archiver.ZipRequest.contents",
            ".archiver.ZipResponse.zipped_contents",
        ])
        .file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/archiver.proto"], &["proto"])
        .unwrap();
}
