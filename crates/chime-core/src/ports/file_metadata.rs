//! Filesystem metadata provider, injectable for testing.

use std::io;
use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;

/// Coarse file type, as seen after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
    Other,
}

/// The subset of filesystem metadata the playback path cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    pub kind: FileKind,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}

impl From<std::fs::Metadata> for FileMetadata {
    fn from(meta: std::fs::Metadata) -> Self {
        let file_type = meta.file_type();
        let kind = if file_type.is_file() {
            FileKind::File
        } else if file_type.is_dir() {
            FileKind::Directory
        } else {
            FileKind::Other
        };
        Self {
            kind,
            len: meta.len(),
            modified: meta.modified().ok(),
        }
    }
}

/// Trait for metadata lookups.
#[async_trait]
pub trait FileMetadataPort: Send + Sync {
    /// Fetch metadata for `path`, following symlinks.
    async fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;
}

/// Production provider backed by `tokio::fs::metadata`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFileMetadata;

#[async_trait]
impl FileMetadataPort for SystemFileMetadata {
    async fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        tokio::fs::metadata(path).await.map(FileMetadata::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn system_provider_classifies_files_and_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("beep.wav");
        std::fs::write(&file, b"RIFF").unwrap();

        let meta = SystemFileMetadata.metadata(&file).await.unwrap();
        assert_eq!(meta.kind, FileKind::File);
        assert_eq!(meta.len, 4);

        let meta = SystemFileMetadata.metadata(dir.path()).await.unwrap();
        assert_eq!(meta.kind, FileKind::Directory);
        assert!(!meta.is_file());
    }

    #[tokio::test]
    async fn system_provider_reports_missing_path() {
        let dir = tempdir().unwrap();
        let err = SystemFileMetadata
            .metadata(&dir.path().join("missing.wav"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
