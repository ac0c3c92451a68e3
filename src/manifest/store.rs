//! Reading and writing chapter files under a book root

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::atomic::atomic_write;
use super::document::{ChapterManifest, ManifestFormatError};
use crate::chapter::ChapterId;
use crate::config::BookLayout;

/// Errors that can occur while reading or writing chapter files
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No manifest at the expected location
    #[error("manifest for chapter {chapter} not found: {}", path.display())]
    NotFound { chapter: ChapterId, path: PathBuf },

    /// No chapter markdown at the expected location
    #[error("chapter {chapter} source not found: {}", path.display())]
    SourceNotFound { chapter: ChapterId, path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid manifest {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ManifestFormatError,
    },

    #[error("failed to serialize manifest for chapter {chapter}: {source}")]
    Serialization {
        chapter: ChapterId,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Which manifest file a save goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// Overwrite the canonical manifest
    #[default]
    InPlace,
    /// Write the sibling review copy, leaving the canonical manifest alone
    Enhanced,
}

/// File access for chapter manifests and sources under one book root
#[derive(Debug, Clone)]
pub struct ManifestStore {
    root: PathBuf,
    layout: BookLayout,
}

impl ManifestStore {
    pub fn new(root: impl Into<PathBuf>, layout: BookLayout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding a chapter's manifests
    pub fn chapter_dir(&self, chapter: ChapterId) -> PathBuf {
        self.root
            .join(&self.layout.diagrams_dir)
            .join(format!("chapter-{chapter}"))
    }

    /// Location of a chapter's manifest for the given target
    pub fn manifest_path(&self, chapter: ChapterId, target: OutputTarget) -> PathBuf {
        let file = match target {
            OutputTarget::InPlace => &self.layout.manifest_file,
            OutputTarget::Enhanced => &self.layout.enhanced_file,
        };
        self.chapter_dir(chapter).join(file)
    }

    /// Location of a chapter's markdown source
    pub fn chapter_source_path(&self, chapter: ChapterId) -> PathBuf {
        self.root
            .join(&self.layout.chapters_dir)
            .join(format!("chapter-{chapter}.md"))
    }

    /// Read a chapter's markdown source
    pub fn read_chapter_source(&self, chapter: ChapterId) -> Result<String, ManifestError> {
        let path = self.chapter_source_path(chapter);
        debug!(chapter = %chapter, path = %path.display(), "reading chapter source");
        std::fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ManifestError::SourceNotFound { chapter, path },
            _ => ManifestError::Read { path, source },
        })
    }

    /// Read a chapter's canonical manifest
    pub fn load(&self, chapter: ChapterId) -> Result<ChapterManifest, ManifestError> {
        let path = self.manifest_path(chapter, OutputTarget::InPlace);
        debug!(chapter = %chapter, path = %path.display(), "loading manifest");

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound { chapter, path })
            }
            Err(source) => return Err(ManifestError::Read { path, source }),
        };

        ChapterManifest::parse(&text).map_err(|source| ManifestError::Invalid { path, source })
    }

    /// Write a manifest, replacing the target file as a whole
    ///
    /// Returns the path written.
    pub fn save(
        &self,
        chapter: ChapterId,
        manifest: &ChapterManifest,
        target: OutputTarget,
    ) -> Result<PathBuf, ManifestError> {
        let text = manifest
            .to_pretty_json()
            .map_err(|source| ManifestError::Serialization { chapter, source })?;

        let path = self.manifest_path(chapter, target);
        debug!(chapter = %chapter, path = %path.display(), bytes = text.len(), "writing manifest");
        atomic_write(&path, text.as_bytes()).map_err(|source| ManifestError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
