use crate::core::Storage;
use crate::utils::error::{Result, SizingError};
use std::path::{Path, PathBuf};

/// 本機檔案系統上的目錄與報表存取；相對路徑以 `root` 為基準
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 絕對路徑不會接在 `root` 之後
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

fn with_path(path: &Path, e: std::io::Error) -> SizingError {
    SizingError::Io(std::io::Error::new(
        e.kind(),
        format!("{}: {}", path.display(), e),
    ))
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tracing::debug!("Reading {}", full_path.display());
        tokio::fs::read(&full_path)
            .await
            .map_err(|e| with_path(&full_path, e))
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| with_path(parent, e))?;
        }

        tokio::fs::write(&full_path, data)
            .await
            .map_err(|e| with_path(&full_path, e))?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}
