//! Diagram entry builder
//!
//! Turns resolved templates into manifest entries. Values come from the
//! template catalog unless a [`ContentStrategy`] supplies them from the chapter
//! text.

use thiserror::Error;

use crate::template::{Diagram, TemplateCatalog, TemplateKind};

/// Errors that can occur while building entries
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A content strategy answered with an entry for the wrong template
    #[error("content strategy returned a '{returned}' entry for a '{requested}' diagram")]
    StrategyMismatch {
        requested: TemplateKind,
        returned: TemplateKind,
    },
}

/// Source of placeholder values derived from chapter prose
///
/// Returning `None` defers to the catalog defaults.
pub trait ContentStrategy {
    fn generate(&self, template: TemplateKind, chapter_text: &str) -> Option<Diagram>;
}

/// Builds diagram entries for one chapter
#[derive(Default)]
pub struct EntryBuilder<'a> {
    catalog: TemplateCatalog,
    strategy: Option<&'a dyn ContentStrategy>,
}

impl<'a> EntryBuilder<'a> {
    /// A builder that always uses catalog defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult `strategy` before falling back to catalog defaults
    pub fn with_strategy(mut self, strategy: &'a dyn ContentStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Build one entry for `template`
    pub fn build(
        &self,
        template: TemplateKind,
        chapter_text: Option<&str>,
    ) -> Result<Diagram, BuildError> {
        let generated = match (self.strategy, chapter_text) {
            (Some(strategy), Some(text)) => strategy.generate(template, text),
            _ => None,
        };

        match generated {
            Some(entry) if entry.kind() != template => Err(BuildError::StrategyMismatch {
                requested: template,
                returned: entry.kind(),
            }),
            Some(entry) => Ok(entry),
            None => Ok(self.catalog.get(template).instantiate()),
        }
    }

    /// Build one entry per template, in order
    pub fn build_all(
        &self,
        templates: &[TemplateKind],
        chapter_text: Option<&str>,
    ) -> Result<Vec<Diagram>, BuildError> {
        templates
            .iter()
            .map(|template| self.build(*template, chapter_text))
            .collect()
    }
}
