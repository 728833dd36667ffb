use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tokio::fs;
use tracing::debug;

use crate::errors::{Result, SkinError};

/// Destination for a rendered head PNG
#[async_trait::async_trait]
pub trait HeadSink: Send + Sync {
    /// Store the encoded PNG
    async fn write_head(&self, png: &[u8]) -> Result<()>;
}

/// Writes the head to a file, creating parent directories as needed
#[derive(Debug, Clone)]
pub struct FileHeadSink {
    path: PathBuf,
}

impl FileHeadSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl HeadSink for FileHeadSink {
    async fn write_head(&self, png: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&self.path, png).await?;
        debug!("Wrote {} byte head to {}", png.len(), self.path.display());
        Ok(())
    }
}

/// In-memory head sink for testing and UI previews
#[derive(Debug, Clone, Default)]
pub struct MemoryHeadSink {
    png: Arc<RwLock<Option<Vec<u8>>>>,
}

impl MemoryHeadSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last head written, if any
    pub fn get(&self) -> Option<Vec<u8>> {
        self.png.read().ok()?.clone()
    }

    pub fn is_written(&self) -> bool {
        self.png.read().map(|png| png.is_some()).unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl HeadSink for MemoryHeadSink {
    async fn write_head(&self, png: &[u8]) -> Result<()> {
        *self
            .png
            .write()
            .map_err(|_| SkinError::Sink("lock poisoned".to_string()))? = Some(png.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_sink_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("heads").join("notch.png");
        let sink = FileHeadSink::new(&path);

        sink.write_head(b"png-bytes").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
    }

    #[test]
    fn test_poisoned_memory_sink() {
        let sink = MemoryHeadSink::new();
        let poisoner = sink.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.png.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let err = runtime.block_on(sink.write_head(b"png")).unwrap_err();
        assert!(matches!(err, SkinError::Sink(_)));
        assert_eq!(err.to_string(), "Head sink unavailable: lock poisoned");
    }

    #[tokio::test]
    async fn test_memory_sink() {
        let sink = MemoryHeadSink::new();
        assert!(!sink.is_written());

        sink.write_head(b"first").await.unwrap();
        sink.write_head(b"second").await.unwrap();

        assert!(sink.is_written());
        assert_eq!(sink.get().unwrap(), b"second");
    }
}
