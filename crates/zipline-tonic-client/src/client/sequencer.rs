//! Message sequencing: ordered file paths in, ordered request units out.
//!
//! The sequence is materialized eagerly so that every input is known to be
//! readable before a single byte goes over the wire. Each unit captures the
//! file's bytes exactly once; nothing is re-read after capture, and the
//! entry name is the path string as given, not a canonicalized form.

use bytes::Bytes;
use zipline_tonic_core::{
    Error, Result,
    types::{FileUnit, OutboundSequence},
};

/// Reads every path into a [`FileUnit`], preserving input order.
///
/// Fails on the first unreadable path with [`Error::UnreadableInput`]; no
/// partial sequence is handed downstream and no skip-and-continue is
/// attempted.
pub async fn read_units(paths: &[String]) -> Result<OutboundSequence> {
    let mut units = Vec::with_capacity(paths.len());
    for path in paths {
        let contents = tokio::fs::read(path)
            .await
            .map_err(|source| Error::UnreadableInput {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path, bytes = contents.len(), "captured input file");
        units.push(FileUnit {
            file_name: path.clone(),
            contents: Bytes::from(contents),
        });
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn preserves_input_order_names_and_bytes() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, b"AB").unwrap();
        std::fs::write(&b, b"C").unwrap();

        let paths = vec![a.display().to_string(), b.display().to_string()];
        let units = read_units(&paths).await.unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].file_name, paths[0]);
        assert_eq!(units[0].contents.as_ref(), b"AB");
        assert_eq!(units[1].file_name, paths[1]);
        assert_eq!(units[1].contents.as_ref(), b"C");
    }

    #[tokio::test]
    async fn empty_input_yields_empty_sequence() {
        let units = read_units(&[]).await.unwrap();
        assert!(units.is_empty());
    }

    #[tokio::test]
    async fn keeps_the_path_string_as_given() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"AB").unwrap();

        // A redundant `.` component reads fine but must survive verbatim in
        // the unit name.
        let path = format!("{}/./a.txt", dir.path().display());
        let units = read_units(std::slice::from_ref(&path)).await.unwrap();
        assert_eq!(units[0].file_name, path);
    }

    #[tokio::test]
    async fn fails_on_the_first_unreadable_path() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        std::fs::write(&good, b"ok").unwrap();
        let missing = dir.path().join("missing.txt").display().to_string();
        let trailing = good.display().to_string();

        let paths = vec![good.display().to_string(), missing.clone(), trailing];
        match read_units(&paths).await {
            Err(Error::UnreadableInput { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected UnreadableInput, got {other:?}"),
        }
    }
}
