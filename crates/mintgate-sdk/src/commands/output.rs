//! Helpers for writing output files.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use eyre::Context as _;
use tempfile::NamedTempFile;

/// Write an output file atomically.
///
/// Contents go to a uniquely named temp file in the same directory which is
/// then renamed over `path`, so readers never observe a partially written
/// file. The temp file is removed if any step fails.
///
/// # Errors
/// Returns an error if the temp file cannot be created, written, flushed or renamed.
pub async fn write_output(path: &Path, contents: &str) -> eyre::Result<()> {
    let path = path.to_path_buf();
    let contents = contents.to_owned();
    tokio::task::spawn_blocking(move || persist_output(&path, contents.as_bytes()))
        .await
        .context("Output writer task panicked")?
}

fn persist_output(path: &Path, contents: &[u8]) -> eyre::Result<()> {
    let dir = output_dir(path);
    let mut file = NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    file.write_all(contents)
        .context("Failed to write to temp file")?;
    file.as_file()
        .sync_all()
        .context("Failed to sync temp file")?;

    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move temp file to {}", path.display()))?;
    Ok(())
}

fn output_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_count(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .expect("Failed to list temp dir")
            .count()
    }

    #[test]
    fn bare_file_name_writes_to_current_dir() {
        assert_eq!(output_dir(Path::new("config.json")), PathBuf::from("."));
        assert_eq!(
            output_dir(Path::new("out/config.json")),
            PathBuf::from("out")
        );
    }

    #[tokio::test]
    async fn replaces_existing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "old").await.expect("Failed to seed file");

        write_output(&path, "new").await.expect("write should succeed");

        let contents = tokio::fs::read_to_string(&path)
            .await
            .expect("Failed to read file");
        assert_eq!(contents, "new");
        assert_eq!(entry_count(dir.path()), 1);
    }

    #[tokio::test]
    async fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        tokio::fs::create_dir(&path)
            .await
            .expect("Failed to create blocking directory");

        assert!(write_output(&path, "new").await.is_err());
        assert_eq!(entry_count(dir.path()), 1);
        assert!(path.is_dir());
    }

    #[tokio::test]
    async fn concurrent_writers_do_not_share_a_temp_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");

        let mut writers = tokio::task::JoinSet::new();
        for i in 0..8_u8 {
            let path = path.clone();
            let contents = format!("writer-{i}");
            writers.spawn(async move { write_output(&path, &contents).await });
        }
        while let Some(result) = writers.join_next().await {
            result
                .expect("writer task should not panic")
                .expect("write should succeed");
        }

        let contents = tokio::fs::read_to_string(&path)
            .await
            .expect("Failed to read file");
        assert!(contents.starts_with("writer-"));
        assert_eq!(entry_count(dir.path()), 1);
    }
}
