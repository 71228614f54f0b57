//! Resource loaders returning raw asset bytes

use std::path::PathBuf;

use async_trait::async_trait;

use super::SceneError;

/// Source of raw asset bytes
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Human-readable identifier used in logs
    fn describe(&self) -> String;

    async fn read(&self) -> Result<Vec<u8>, SceneError>;
}

/// Bytes compiled into the binary
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    name: &'static str,
    bytes: &'static [u8],
}

impl EmbeddedSource {
    pub const fn new(name: &'static str, bytes: &'static [u8]) -> Self {
        Self { name, bytes }
    }
}

#[async_trait]
impl ResourceSource for EmbeddedSource {
    fn describe(&self) -> String {
        format!("embedded:{}", self.name)
    }

    async fn read(&self) -> Result<Vec<u8>, SceneError> {
        Ok(self.bytes.to_vec())
    }
}

/// A file on disk, read without blocking the caller's thread
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ResourceSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<Vec<u8>, SceneError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| SceneError::Resource(format!("{}: {}", self.path.display(), e)))
    }
}
