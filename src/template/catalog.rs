//! Template catalog: the fixed set of diagram templates and their defaults

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::placeholders::Diagram;

/// Errors that can occur during template lookup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// Template name not in the catalog
    #[error("unknown template '{name}' (available: {available})")]
    UnknownTemplate { name: String, available: String },
}

impl TemplateError {
    fn unknown(name: &str) -> Self {
        Self::UnknownTemplate {
            name: name.to_string(),
            available: TemplateKind::ALL
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Name of a catalog template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    Architecture,
    Flowchart,
    Sequence,
    ConceptMap,
    RadialConcept,
    Timeline,
    Comparison,
    ComparisonTable,
    Gantt,
    Mindmap,
    ClassDiagram,
}

impl TemplateKind {
    /// Every template, in rotation order
    pub const ALL: [TemplateKind; 11] = [
        TemplateKind::Architecture,
        TemplateKind::Flowchart,
        TemplateKind::Sequence,
        TemplateKind::ConceptMap,
        TemplateKind::RadialConcept,
        TemplateKind::Timeline,
        TemplateKind::Comparison,
        TemplateKind::ComparisonTable,
        TemplateKind::Gantt,
        TemplateKind::Mindmap,
        TemplateKind::ClassDiagram,
    ];

    /// Manifest name of the template
    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Architecture => "architecture",
            TemplateKind::Flowchart => "flowchart",
            TemplateKind::Sequence => "sequence",
            TemplateKind::ConceptMap => "concept-map",
            TemplateKind::RadialConcept => "radial-concept",
            TemplateKind::Timeline => "timeline",
            TemplateKind::Comparison => "comparison",
            TemplateKind::ComparisonTable => "comparison-table",
            TemplateKind::Gantt => "gantt",
            TemplateKind::Mindmap => "mindmap",
            TemplateKind::ClassDiagram => "class-diagram",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateKind {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        TemplateKind::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .ok_or_else(|| TemplateError::unknown(name))
    }
}

/// A catalog entry: the ordered placeholder keys of a template and their defaults
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDefinition {
    /// Template name
    pub kind: TemplateKind,
    /// Placeholder key -> default value, in declaration order
    pub defaults: Map<String, Value>,
}

impl TemplateDefinition {
    fn for_kind(kind: TemplateKind) -> Self {
        let defaults = Diagram::defaults(kind).placeholders().unwrap_or_default();
        Self { kind, defaults }
    }

    /// Get the default value for a placeholder
    pub fn get_default(&self, key: &str) -> Option<&Value> {
        self.defaults.get(key)
    }

    /// Check if this template declares a placeholder
    pub fn has_placeholder(&self, key: &str) -> bool {
        self.defaults.contains_key(key)
    }

    /// Get all placeholder keys, in declaration order
    pub fn placeholder_keys(&self) -> Vec<&str> {
        self.defaults.keys().map(|k| k.as_str()).collect()
    }

    /// A fresh entry filled with this template's defaults
    pub fn instantiate(&self) -> Diagram {
        Diagram::defaults(self.kind)
    }
}

/// The immutable set of templates available to the authoring tools
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<TemplateDefinition>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateCatalog {
    /// The compiled-in catalog, in rotation order
    pub fn builtin() -> Self {
        Self {
            templates: TemplateKind::ALL
                .into_iter()
                .map(TemplateDefinition::for_kind)
                .collect(),
        }
    }

    /// Look a template up by manifest name
    pub fn lookup(&self, name: &str) -> Result<&TemplateDefinition, TemplateError> {
        let kind: TemplateKind = name.parse()?;
        Ok(self.get(kind))
    }

    /// Get the definition of a template
    pub fn get(&self, kind: TemplateKind) -> &TemplateDefinition {
        // The catalog holds every kind at its rotation index
        &self.templates[Self::index_of(kind)]
    }

    /// Template at a rotation index, wrapping around the catalog
    pub fn at(&self, index: usize) -> TemplateKind {
        self.templates[index % self.templates.len()].kind
    }

    /// Number of templates in one rotation pass
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over all definitions in rotation order
    pub fn iter(&self) -> impl Iterator<Item = &TemplateDefinition> {
        self.templates.iter()
    }

    fn index_of(kind: TemplateKind) -> usize {
        TemplateKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default()
    }
}
