//! Chapter Diagrams - diagram placeholder authoring for book chapters
//!
//! This library extends per-chapter diagram manifests (`content.json`) with
//! placeholder entries drawn from a fixed catalog of diagram templates. A
//! distribution plan decides how many diagrams, or which templates, each
//! chapter receives.
//!
//! # Example
//!
//! ```rust
//! use chapter_diagrams::{select_templates, ChapterId, TemplateCatalog, TemplateKind};
//!
//! let catalog = TemplateCatalog::builtin();
//! let chapter: ChapterId = "03".parse().unwrap();
//!
//! let templates = select_templates(&catalog, chapter, Some(4), None).unwrap();
//! assert_eq!(templates[0], TemplateKind::Flowchart);
//! assert_eq!(templates.len(), 4);
//! ```

pub mod builder;
pub mod chapter;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod pipeline;
pub mod plan;
pub mod template;

pub use builder::{BuildError, ContentStrategy, EntryBuilder};
pub use chapter::{ChapterId, ChapterIdError};
pub use config::{AuthoringConfig, BookLayout, ConfigError};
pub use error::AuthorError;
pub use manifest::{ChapterManifest, EntryIssue, ManifestError, ManifestStore, OutputTarget};
pub use pipeline::{
    Authoring, BatchReport, ChapterFailure, ChapterReport, ChapterRequest, ExtendedChapter,
    LoadedChapter,
};
pub use plan::{
    rotate, select_templates, ChapterAllocation, DistributionError, DistributionPlan, PlanError,
};
pub use template::{Diagram, TemplateCatalog, TemplateDefinition, TemplateError, TemplateKind};

/// Append a chapter's planned diagrams to its manifest
///
/// # Example
///
/// ```rust,no_run
/// use chapter_diagrams::{add_diagrams, AuthoringConfig, ChapterRequest};
///
/// let config = AuthoringConfig::new("/path/to/book");
/// let request = ChapterRequest::new("04".parse().unwrap());
/// let report = add_diagrams(config, &request).unwrap();
/// println!("{} diagrams in {}", report.total(), report.path.display());
/// ```
pub fn add_diagrams(
    config: AuthoringConfig,
    request: &ChapterRequest,
) -> Result<ChapterReport, AuthorError> {
    Authoring::new(config).add_diagrams(request)
}

/// Append planned diagrams to every chapter with a template list
///
/// Failures are collected per chapter; the run never stops early.
pub fn run_batch(config: AuthoringConfig, target: OutputTarget) -> BatchReport {
    Authoring::new(config).run_batch(target)
}
