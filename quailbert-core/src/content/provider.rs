//! Backing stores for the content collections.

use crate::error::ContentError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;

/// The three content collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Trivia,
    Responses,
    Keywords,
}

impl ContentKind {
    pub fn name(&self) -> &'static str {
        match self {
            ContentKind::Trivia => "trivia",
            ContentKind::Responses => "responses",
            ContentKind::Keywords => "keywords",
        }
    }
}

/// Raw storage for serialized collections.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Read a collection. `Ok(None)` when it has never been written.
    async fn load(&self, kind: ContentKind) -> Result<Option<String>, ContentError>;

    /// Replace a collection with `text`.
    async fn store(&self, kind: ContentKind, text: &str) -> Result<(), ContentError>;
}

/// File names for each collection, rooted at a base directory.
#[derive(Debug, Clone)]
pub struct ContentPaths {
    pub base_dir: PathBuf,
    pub trivia: String,
    pub responses: String,
    pub keywords: String,
}

impl ContentPaths {
    /// Default file names inside `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            trivia: "trivia.json".to_string(),
            responses: "response.json".to_string(),
            keywords: "questions.json".to_string(),
        }
    }

    pub fn path(&self, kind: ContentKind) -> PathBuf {
        let file = match kind {
            ContentKind::Trivia => &self.trivia,
            ContentKind::Responses => &self.responses,
            ContentKind::Keywords => &self.keywords,
        };
        self.base_dir.join(file)
    }
}

impl Default for ContentPaths {
    fn default() -> Self {
        Self::new(".")
    }
}

/// JSON files on disk. Writes rewrite the whole file.
#[derive(Debug, Clone)]
pub struct JsonFiles {
    paths: ContentPaths,
}

impl JsonFiles {
    pub fn new(paths: ContentPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ContentPaths {
        &self.paths
    }
}

#[async_trait]
impl ContentProvider for JsonFiles {
    async fn load(&self, kind: ContentKind) -> Result<Option<String>, ContentError> {
        match fs::read_to_string(self.paths.path(kind)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, kind: ContentKind, text: &str) -> Result<(), ContentError> {
        fs::write(self.paths.path(kind), text).await?;
        Ok(())
    }
}

/// In-memory collections, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryContent {
    collections: Mutex<HashMap<ContentKind, String>>,
}

impl MemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with serialized text.
    pub fn with(self, kind: ContentKind, text: impl Into<String>) -> Self {
        self.lock().insert(kind, text.into());
        self
    }

    /// The last text stored for a collection.
    pub fn get(&self, kind: ContentKind) -> Option<String> {
        self.lock().get(&kind).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ContentKind, String>> {
        self.collections.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ContentProvider for MemoryContent {
    async fn load(&self, kind: ContentKind) -> Result<Option<String>, ContentError> {
        Ok(self.get(kind))
    }

    async fn store(&self, kind: ContentKind, text: &str) -> Result<(), ContentError> {
        self.lock().insert(kind, text.to_string());
        Ok(())
    }
}
