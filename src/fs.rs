use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{ConvertError, Result};

/// File operations the converter needs, injectable for tests.
#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn read_to_string(&self, path: &Path) -> Result<String>;
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;
    /// Replace the file at `path` with `data`.
    async fn write(&self, path: &Path, data: &[u8]) -> Result<()>;
    async fn remove(&self, path: &Path) -> Result<()>;
}

/// The real file system.
///
/// `write` goes through a sibling `.part` file and a rename, so a failed write
/// never leaves a truncated file at the destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl FileSystem for TokioFs {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .map_err(|e| ConvertError::io(path, e))
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).await.map_err(|e| ConvertError::io(path, e))
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let part = part_path(path);
        if let Err(e) = fs::write(&part, data).await {
            fs::remove_file(&part).await.ok();
            return Err(ConvertError::io(path, e));
        }
        if let Err(e) = fs::rename(&part, path).await {
            fs::remove_file(&part).await.ok();
            return Err(ConvertError::io(path, e));
        }
        Ok(())
    }

    async fn remove(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)
            .await
            .map_err(|e| ConvertError::io(path, e))
    }
}

fn part_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.part", name))
}

/// Absolute form of `path`, relative paths taken from the working directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| ConvertError::io(path, e))?;
    Ok(cwd.join(path))
}
