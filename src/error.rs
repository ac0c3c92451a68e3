//! Error type for authoring operations

use thiserror::Error;

use crate::builder::BuildError;
use crate::chapter::ChapterId;
use crate::manifest::ManifestError;
use crate::plan::DistributionError;
use crate::template::TemplateError;

/// Errors that can occur while adding diagrams to a chapter
#[derive(Debug, Error)]
pub enum AuthorError {
    /// No chapter was given on the command line
    #[error("no chapter specified (available: {available})")]
    MissingChapter { available: String },

    /// Chapter has no entry in the distribution plan
    #[error("chapter {chapter} is not in the distribution plan (available: {available})")]
    ChapterNotPlanned {
        chapter: ChapterId,
        available: String,
    },

    /// Template selection failed
    #[error(transparent)]
    Distribution(#[from] DistributionError),

    /// Reading or writing chapter files failed
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Building entries failed
    #[error(transparent)]
    Build(#[from] BuildError),

    /// New entries could not be encoded as JSON
    #[error("failed to encode diagrams for chapter {chapter}: {source}")]
    Encode {
        chapter: ChapterId,
        #[source]
        source: serde_json::Error,
    },
}

impl AuthorError {
    /// True for errors caused by how the tool was invoked rather than by chapter files
    pub fn is_invocation_error(&self) -> bool {
        matches!(
            self,
            AuthorError::MissingChapter { .. } | AuthorError::ChapterNotPlanned { .. }
        )
    }

    /// True when the chapter's manifest file does not exist
    pub fn is_manifest_not_found(&self) -> bool {
        matches!(self, AuthorError::Manifest(ManifestError::NotFound { .. }))
    }

    /// True when a template name did not resolve in the catalog
    pub fn is_unknown_template(&self) -> bool {
        matches!(
            self,
            AuthorError::Distribution(DistributionError::Template(
                TemplateError::UnknownTemplate { .. }
            ))
        )
    }
}
