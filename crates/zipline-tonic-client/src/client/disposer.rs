//! Result disposal: persist, announce, linger, remove.
//!
//! The artifact's lifecycle is a straight line: Pending (response resolved,
//! nothing on disk) -> Written (announced, observable) -> Removed. Removal
//! is time-triggered and unconditional; nothing checks whether the artifact
//! is still being read. Swap this module out for a caller-acknowledged
//! scheme if that sharp edge is unacceptable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use zipline_tonic_core::{Error, Result, types::ArchiveResult};

/// Writes the archive to a fixed artifact path, then removes it after a
/// fixed observation window.
#[derive(Debug, Clone)]
pub struct Disposer {
    artifact: PathBuf,
    linger: Duration,
}

impl Disposer {
    pub fn new(artifact: PathBuf, linger: Duration) -> Self {
        Self { artifact, linger }
    }

    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// Persists `zipped_contents` verbatim, announces the artifact, sleeps
    /// the linger window, and removes the artifact.
    ///
    /// The bytes are staged next to the artifact and renamed into place, so
    /// an aborting failure never leaves a partially written artifact under
    /// the announced name. A failed removal is reported at warn level and
    /// does not fail the call.
    pub async fn dispose(&self, result: ArchiveResult) -> Result<()> {
        let staged = self.staged_path();
        tokio::fs::write(&staged, &result.zipped_contents)
            .await
            .map_err(|source| Error::ArtifactWrite {
                path: staged.clone(),
                source,
            })?;
        if let Err(source) = tokio::fs::rename(&staged, &self.artifact).await {
            let _ = tokio::fs::remove_file(&staged).await;
            return Err(Error::ArtifactWrite {
                path: self.artifact.clone(),
                source,
            });
        }

        tracing::info!(
            artifact = %self.artifact.display(),
            bytes = result.zipped_contents.len(),
            "wrote archive to the working directory"
        );
        tracing::info!(
            secs = self.linger.as_secs_f64(),
            "artifact will be removed when the observation window ends"
        );

        tokio::time::sleep(self.linger).await;

        match tokio::fs::remove_file(&self.artifact).await {
            Ok(()) => {
                tracing::info!(artifact = %self.artifact.display(), "artifact removed");
            }
            Err(source) => {
                // Non-fatal: the artifact already served its purpose.
                let err = Error::ArtifactRemoval {
                    path: self.artifact.clone(),
                    source,
                };
                tracing::warn!(error = %err, "artifact removal failed");
            }
        }
        Ok(())
    }

    fn staged_path(&self) -> PathBuf {
        let mut name = self
            .artifact
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".part");
        self.artifact.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tempfile::TempDir;

    const LINGER: Duration = Duration::from_millis(250);

    fn archive(bytes: &'static [u8]) -> ArchiveResult {
        ArchiveResult {
            zipped_contents: Bytes::from_static(bytes),
        }
    }

    async fn wait_for_artifact(path: &Path) {
        for _ in 0..100 {
            if path.exists() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("artifact never appeared at {}", path.display());
    }

    #[tokio::test]
    async fn writes_bytes_verbatim_then_removes_after_the_window() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("compressed.zip");
        let disposer = Disposer::new(artifact.clone(), LINGER);

        let handle = tokio::spawn(async move { disposer.dispose(archive(b"PK\x03\x04zip")).await });

        wait_for_artifact(&artifact).await;
        let written = std::fs::read(&artifact).unwrap();
        assert_eq!(written, b"PK\x03\x04zip");

        handle.await.unwrap().unwrap();
        assert!(!artifact.exists());
    }

    #[tokio::test]
    async fn write_failure_leaves_nothing_behind() {
        let dir = TempDir::new().unwrap();
        // Parent directory does not exist, so the staged write fails.
        let artifact = dir.path().join("missing").join("compressed.zip");
        let disposer = Disposer::new(artifact.clone(), LINGER);

        match disposer.dispose(archive(b"Z")).await {
            Err(Error::ArtifactWrite { .. }) => {}
            other => panic!("expected ArtifactWrite, got {other:?}"),
        }
        assert!(!artifact.exists());
        assert!(!disposer.staged_path().exists());
    }

    #[tokio::test]
    async fn external_removal_is_non_fatal() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("compressed.zip");
        let disposer = Disposer::new(artifact.clone(), LINGER);

        let racer = artifact.clone();
        let handle = tokio::spawn(async move { disposer.dispose(archive(b"Z")).await });

        wait_for_artifact(&racer).await;
        std::fs::remove_file(&racer).unwrap();

        // The disposer's own removal fails, but the call still succeeds.
        handle.await.unwrap().unwrap();
    }
}
