//! Distribution plan: how many diagrams, or which templates, each chapter receives
//!
//! Plans are written in TOML. Each entry under `[chapters]` maps a two-digit
//! chapter to either a diagram count or an explicit list of template names.
//! Single-chapter runs rotate through the catalog with the entry's count;
//! template lists are used by batch runs or when asked for explicitly.
//!
//! ```toml
//! [chapters]
//! 01 = 2
//! 04 = ["flowchart", "comparison-table"]
//! ```

mod policy;

pub use policy::{rotate, select_templates, DistributionError};

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::chapter::{ChapterId, ChapterIdError};
use crate::template::{TemplateCatalog, TemplateError, TemplateKind};

/// Errors that can occur when loading or parsing a plan
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Failed to read plan file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse plan TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid chapter key in plan: {0}")]
    Chapter(#[from] ChapterIdError),
    #[error("chapter {chapter}: {source}")]
    Template {
        chapter: ChapterId,
        #[source]
        source: TemplateError,
    },
    #[error("chapter {chapter}: allocation must add at least one diagram")]
    EmptyAllocation { chapter: ChapterId },
}

/// What a chapter receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterAllocation {
    /// Add this many diagrams, templates chosen by rotation
    Count(usize),
    /// Add exactly these templates, in order, when the list is requested
    Templates(Vec<TemplateKind>),
}

impl ChapterAllocation {
    /// Number of diagrams this allocation adds
    pub fn count(&self) -> usize {
        match self {
            ChapterAllocation::Count(n) => *n,
            ChapterAllocation::Templates(list) => list.len(),
        }
    }
}

/// A chapter-to-allocation table, read-only after loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionPlan {
    chapters: BTreeMap<ChapterId, ChapterAllocation>,
}

/// TOML structure for deserializing plans
#[derive(Deserialize)]
struct TomlPlan {
    #[serde(default)]
    chapters: BTreeMap<String, TomlAllocation>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum TomlAllocation {
    Count(usize),
    Templates(Vec<String>),
}

/// Chapter allocations used when no plan file is given
const DEFAULT_PLAN: &str = r#"
[chapters]
01 = 2
02 = 3
03 = ["class-diagram", "radial-concept", "comparison", "timeline"]
04 = ["flowchart", "comparison-table"]
05 = ["architecture", "sequence", "gantt", "mindmap"]
06 = ["class-diagram", "radial-concept"]
07 = ["timeline", "comparison", "flowchart"]
08 = ["sequence", "comparison-table", "gantt", "architecture"]
09 = ["mindmap", "class-diagram", "radial-concept"]
10 = ["timeline", "flowchart", "comparison"]
11 = ["sequence", "architecture", "comparison-table", "gantt", "mindmap"]
12 = ["class-diagram", "radial-concept"]
13 = ["timeline", "flowchart"]
14 = ["comparison", "sequence"]
"#;

impl DistributionPlan {
    /// Load a plan from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, PlanError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a plan from a TOML string
    pub fn from_str(content: &str) -> Result<Self, PlanError> {
        let parsed: TomlPlan = toml::from_str(content)?;
        Self::from_table(parsed.chapters)
    }

    /// Build a plan from raw `[chapters]` entries, checking every template name
    pub(crate) fn from_table(table: BTreeMap<String, TomlAllocation>) -> Result<Self, PlanError> {
        let catalog = TemplateCatalog::builtin();
        let mut chapters = BTreeMap::new();

        for (key, raw) in table {
            let chapter: ChapterId = key.parse()?;
            let allocation = match raw {
                TomlAllocation::Count(0) => return Err(PlanError::EmptyAllocation { chapter }),
                TomlAllocation::Count(n) => ChapterAllocation::Count(n),
                TomlAllocation::Templates(names) if names.is_empty() => {
                    return Err(PlanError::EmptyAllocation { chapter })
                }
                TomlAllocation::Templates(names) => ChapterAllocation::Templates(
                    names
                        .iter()
                        .map(|name| catalog.lookup(name).map(|def| def.kind))
                        .collect::<Result<_, _>>()
                        .map_err(|source| PlanError::Template { chapter, source })?,
                ),
            };
            chapters.insert(chapter, allocation);
        }

        Ok(Self { chapters })
    }

    /// Get the allocation of a chapter
    pub fn get(&self, chapter: ChapterId) -> Option<&ChapterAllocation> {
        self.chapters.get(&chapter)
    }

    /// Check if a chapter is planned
    pub fn contains(&self, chapter: ChapterId) -> bool {
        self.chapters.contains_key(&chapter)
    }

    /// All planned chapters in ascending order
    pub fn chapters(&self) -> impl Iterator<Item = (ChapterId, &ChapterAllocation)> {
        self.chapters.iter().map(|(id, alloc)| (*id, alloc))
    }

    /// Chapters with an explicit template list, processed by batch runs
    pub fn listed_chapters(&self) -> Vec<ChapterId> {
        self.chapters
            .iter()
            .filter(|(_, alloc)| matches!(alloc, ChapterAllocation::Templates(_)))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Comma-separated chapter list for diagnostics
    pub fn available(&self) -> String {
        self.chapters
            .keys()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Resolve the templates to add to a planned chapter
    ///
    /// Priority: the caller's `explicit` list (truncated to the planned count),
    /// then the plan's own list when `use_list` is set, then rotation with the
    /// planned count. Returns `None` for chapters not in the plan.
    pub fn resolve(
        &self,
        catalog: &TemplateCatalog,
        chapter: ChapterId,
        explicit: Option<&[String]>,
        use_list: bool,
    ) -> Option<Result<Vec<TemplateKind>, DistributionError>> {
        let allocation = self.get(chapter)?;
        let count = allocation.count();

        let resolved = match (explicit, allocation) {
            (Some(_), _) => select_templates(catalog, chapter, Some(count), explicit),
            (None, ChapterAllocation::Templates(list)) if use_list => Ok(list.clone()),
            (None, _) => select_templates(catalog, chapter, Some(count), None),
        };
        Some(resolved)
    }
}

impl Default for DistributionPlan {
    fn default() -> Self {
        Self::from_str(DEFAULT_PLAN).expect("Default plan should be valid TOML")
    }
}
