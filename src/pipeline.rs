//! Per-chapter authoring pipeline
//!
//! Each chapter goes through three states in order: [`LoadedChapter`] (source
//! and manifest read), [`ExtendedChapter`] (new entries appended in memory) and
//! [`ChapterReport`] (manifest written). The write is the last step, so a
//! failure anywhere leaves the files on disk as they were.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::builder::{ContentStrategy, EntryBuilder};
use crate::chapter::ChapterId;
use crate::config::AuthoringConfig;
use crate::error::AuthorError;
use crate::manifest::{ChapterManifest, EntryIssue, ManifestError, ManifestStore, OutputTarget};
use crate::plan::DistributionPlan;
use crate::template::{TemplateCatalog, TemplateKind};

/// A single-chapter run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRequest {
    pub chapter: ChapterId,
    /// Caller-chosen template names, truncated to the planned count
    pub templates: Option<Vec<String>>,
    /// Use the plan's template list instead of rotating through the catalog
    pub planned: bool,
    pub target: OutputTarget,
}

impl ChapterRequest {
    pub fn new(chapter: ChapterId) -> Self {
        Self {
            chapter,
            templates: None,
            planned: false,
            target: OutputTarget::InPlace,
        }
    }

    pub fn with_templates(mut self, templates: Vec<String>) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn with_planned_list(mut self, planned: bool) -> Self {
        self.planned = planned;
        self
    }

    pub fn with_target(mut self, target: OutputTarget) -> Self {
        self.target = target;
        self
    }
}

/// A chapter whose source and manifest have been read
#[derive(Debug)]
pub struct LoadedChapter {
    chapter: ChapterId,
    source: String,
    manifest: ChapterManifest,
}

impl LoadedChapter {
    /// Read the chapter source and its canonical manifest
    pub fn load(store: &ManifestStore, chapter: ChapterId) -> Result<Self, ManifestError> {
        let source = store.read_chapter_source(chapter)?;
        let manifest = store.load(chapter)?;
        Ok(Self {
            chapter,
            source,
            manifest,
        })
    }

    pub fn manifest(&self) -> &ChapterManifest {
        &self.manifest
    }

    /// Build entries for `templates` and append them after the existing ones
    pub fn extend(
        self,
        builder: &EntryBuilder<'_>,
        templates: &[TemplateKind],
    ) -> Result<ExtendedChapter, AuthorError> {
        let entries = builder.build_all(templates, Some(self.source.as_str()))?;
        let existing = self.manifest.len();

        let mut manifest = self.manifest;
        manifest
            .append(&entries)
            .map_err(|source| AuthorError::Encode {
                chapter: self.chapter,
                source,
            })?;

        Ok(ExtendedChapter {
            chapter: self.chapter,
            manifest,
            existing,
            added: templates.to_vec(),
        })
    }
}

/// A chapter whose manifest has been extended in memory
#[derive(Debug)]
pub struct ExtendedChapter {
    chapter: ChapterId,
    manifest: ChapterManifest,
    existing: usize,
    added: Vec<TemplateKind>,
}

impl ExtendedChapter {
    pub fn manifest(&self) -> &ChapterManifest {
        &self.manifest
    }

    /// Persist the extended manifest
    pub fn save(
        self,
        store: &ManifestStore,
        target: OutputTarget,
    ) -> Result<ChapterReport, ManifestError> {
        let path = store.save(self.chapter, &self.manifest, target)?;
        Ok(ChapterReport {
            chapter: self.chapter,
            existing: self.existing,
            added: self.added,
            target,
            path,
        })
    }
}

/// Outcome of a saved chapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterReport {
    pub chapter: ChapterId,
    /// Entries the manifest held before the run
    pub existing: usize,
    /// Templates appended, in order
    pub added: Vec<TemplateKind>,
    pub target: OutputTarget,
    /// File written
    pub path: PathBuf,
}

impl ChapterReport {
    pub fn total(&self) -> usize {
        self.existing + self.added.len()
    }
}

/// A chapter that failed during a batch run
#[derive(Debug)]
pub struct ChapterFailure {
    pub chapter: ChapterId,
    pub error: AuthorError,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<ChapterReport>,
    pub failed: Vec<ChapterFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Adds diagram placeholders to chapter manifests
pub struct Authoring<'a> {
    catalog: TemplateCatalog,
    plan: DistributionPlan,
    store: ManifestStore,
    builder: EntryBuilder<'a>,
}

impl<'a> Authoring<'a> {
    pub fn new(config: AuthoringConfig) -> Self {
        Self {
            catalog: TemplateCatalog::builtin(),
            store: ManifestStore::new(config.root, config.layout),
            plan: config.plan,
            builder: EntryBuilder::new(),
        }
    }

    /// Let `strategy` fill placeholders from chapter text
    pub fn with_strategy(mut self, strategy: &'a dyn ContentStrategy) -> Self {
        self.builder = self.builder.with_strategy(strategy);
        self
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn plan(&self) -> &DistributionPlan {
        &self.plan
    }

    pub fn store(&self) -> &ManifestStore {
        &self.store
    }

    /// Templates a request would add, without touching any file
    pub fn resolve_templates(
        &self,
        request: &ChapterRequest,
    ) -> Result<Vec<TemplateKind>, AuthorError> {
        let resolved = self
            .plan
            .resolve(
                &self.catalog,
                request.chapter,
                request.templates.as_deref(),
                request.planned,
            )
            .ok_or_else(|| AuthorError::ChapterNotPlanned {
                chapter: request.chapter,
                available: self.plan.available(),
            })?;
        Ok(resolved?)
    }

    /// Append the chapter's planned diagrams to its manifest
    pub fn add_diagrams(&self, request: &ChapterRequest) -> Result<ChapterReport, AuthorError> {
        let templates = self.resolve_templates(request)?;
        debug!(
            chapter = %request.chapter,
            templates = ?templates,
            "resolved templates"
        );

        let loaded = LoadedChapter::load(&self.store, request.chapter)?;
        let extended = loaded.extend(&self.builder, &templates)?;
        let report = extended.save(&self.store, request.target)?;

        info!(
            chapter = %report.chapter,
            added = report.added.len(),
            total = report.total(),
            path = %report.path.display(),
            "manifest updated"
        );
        Ok(report)
    }

    /// Add planned diagrams to every chapter with a template list
    ///
    /// A failing chapter is recorded and the run moves on to the next one.
    pub fn run_batch(&self, target: OutputTarget) -> BatchReport {
        let mut report = BatchReport::default();

        for chapter in self.plan.listed_chapters() {
            let request = ChapterRequest::new(chapter)
                .with_planned_list(true)
                .with_target(target);
            match self.add_diagrams(&request) {
                Ok(done) => report.succeeded.push(done),
                Err(error) => {
                    warn!(chapter = %chapter, error = %error, "chapter skipped");
                    report.failed.push(ChapterFailure { chapter, error });
                }
            }
        }

        report
    }

    /// Entries in a chapter's manifest that do not match the catalog
    pub fn check_chapter(&self, chapter: ChapterId) -> Result<Vec<EntryIssue>, AuthorError> {
        let manifest = self.store.load(chapter)?;
        Ok(manifest.check())
    }
}
