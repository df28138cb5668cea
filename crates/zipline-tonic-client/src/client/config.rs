use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::bail;
use clap::Parser;
use zipline_tonic_core::types::{DEFAULT_ARTIFACT_NAME, DEFAULT_ENDPOINT};

/// Runtime configuration for the `zipline-tonic-client` binary.
///
/// All values are parsed from CLI arguments or environment variables, with
/// defaults matching the archiver service's conventions.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "zipline-tonic-client",
    version,
    about = "Streams local files to a gRPC archiver service and retrieves the zipped result"
)]
pub struct CliArgs {
    /// Files to archive, streamed in the order given.
    ///
    /// Each path must reference a readable file; the first unreadable path
    /// fails the whole call before anything is sent. An empty list is
    /// allowed and still performs a (zero-unit) call.
    pub files: Vec<String>,

    /// Address of the archiver service.
    ///
    /// Environment variable: `ZIPLINE_ENDPOINT`
    #[arg(long, env = "ZIPLINE_ENDPOINT", default_value_t = String::from(DEFAULT_ENDPOINT))]
    pub endpoint: String,

    /// File name for the retrieved archive, created in the current working
    /// directory.
    ///
    /// Environment variable: `ZIPLINE_ARTIFACT_NAME`
    #[arg(long, env = "ZIPLINE_ARTIFACT_NAME", default_value_t = String::from(DEFAULT_ARTIFACT_NAME))]
    pub artifact_name: String,

    /// Seconds the artifact remains on disk before it is removed.
    ///
    /// Removal is time-triggered and unconditional; nothing checks whether
    /// the artifact is still being read.
    ///
    /// Environment variable: `ZIPLINE_LINGER_SECS`
    #[arg(long, env = "ZIPLINE_LINGER_SECS", default_value_t = 5)]
    pub linger_secs: u64,

    /// Derive a per-call unique artifact name instead of the fixed one.
    ///
    /// The fixed name races when concurrent calls share a working directory
    /// (one call's delayed removal can collide with another's write). This
    /// flag sidesteps the race by suffixing the name with the process id and
    /// a timestamp.
    #[arg(long, default_value_t = false)]
    pub unique_artifact: bool,
}

/// Validated configuration for one archive call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub files: Vec<String>,
    pub endpoint: String,
    pub artifact: PathBuf,
    pub linger: Duration,
}

impl TryFrom<CliArgs> for ClientConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.artifact_name.is_empty() {
            bail!("ZIPLINE_ARTIFACT_NAME must not be empty");
        }
        if args.artifact_name.contains(['/', '\\']) {
            bail!(
                "ZIPLINE_ARTIFACT_NAME must be a bare file name, got {:?}",
                args.artifact_name
            );
        }

        let artifact = if args.unique_artifact {
            PathBuf::from(unique_artifact_name(&args.artifact_name))
        } else {
            PathBuf::from(args.artifact_name)
        };

        Ok(Self {
            files: args.files,
            endpoint: args.endpoint,
            artifact,
            linger: Duration::from_secs(args.linger_secs),
        })
    }
}

/// Suffixes `name` with the process id and a wall-clock timestamp, keeping
/// the extension: `compressed.zip` becomes `compressed-1234-17....zip`.
fn unique_artifact_name(name: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let pid = std::process::id();
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{pid}-{nanos}.{ext}"),
        _ => format!("{name}-{pid}-{nanos}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(
            std::iter::once("zipline-tonic-client").chain(argv.iter().copied()),
        )
        .unwrap()
    }

    #[test]
    fn defaults_match_conventions() {
        let config = ClientConfig::try_from(parse(&["a.txt", "b.txt"])).unwrap();
        assert_eq!(config.files, vec!["a.txt", "b.txt"]);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.artifact, PathBuf::from(DEFAULT_ARTIFACT_NAME));
        assert_eq!(config.linger, Duration::from_secs(5));
    }

    #[test]
    fn rejects_artifact_names_with_separators() {
        let args = parse(&["--artifact-name", "nested/compressed.zip"]);
        assert!(ClientConfig::try_from(args).is_err());
    }

    #[test]
    fn rejects_empty_artifact_name() {
        let args = parse(&["--artifact-name", ""]);
        assert!(ClientConfig::try_from(args).is_err());
    }

    #[test]
    fn unique_artifact_keeps_the_extension() {
        let args = parse(&["--unique-artifact"]);
        let config = ClientConfig::try_from(args).unwrap();
        let name = config.artifact.to_string_lossy().into_owned();
        assert!(name.starts_with("compressed-"));
        assert!(name.ends_with(".zip"));
        assert_ne!(name, DEFAULT_ARTIFACT_NAME);
    }
}
