//! Diagram templates and their placeholder catalog
//!
//! A template is a named diagram shape with a fixed, ordered set of placeholder
//! keys. The catalog is compiled in and never mutated. New manifest entries are
//! built from [`Diagram`], whose variants carry one typed record per template.
//!
//! # Example
//!
//! ```rust
//! use chapter_diagrams::template::{TemplateCatalog, TemplateKind};
//!
//! let catalog = TemplateCatalog::builtin();
//! let flowchart = catalog.lookup("flowchart").unwrap();
//! assert_eq!(flowchart.kind, TemplateKind::Flowchart);
//! assert!(flowchart.has_placeholder("START_LABEL"));
//! ```

mod catalog;
mod placeholders;

pub use catalog::{TemplateCatalog, TemplateDefinition, TemplateError, TemplateKind};
pub use placeholders::{
    ArchitecturePlaceholders, ClassDiagramPlaceholders, ComparisonPlaceholders,
    ComparisonTablePlaceholders, ConceptMapPlaceholders, Diagram, FlowchartPlaceholders,
    GanttPlaceholders, MindmapPlaceholders, RadialConceptPlaceholders, SequencePlaceholders,
    TimelinePlaceholders,
};
