//! Template selection for a single chapter
//!
//! Selection is a pure function of its inputs: the same chapter, count and
//! explicit list always give the same templates.

use thiserror::Error;

use crate::chapter::ChapterId;
use crate::template::{TemplateCatalog, TemplateError, TemplateKind};

/// Errors that can occur while choosing templates for a chapter
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DistributionError {
    /// Requested diagram count is missing or zero
    #[error("invalid diagram count for chapter {chapter}: {reason}")]
    InvalidCount { chapter: ChapterId, reason: String },

    /// A selected template is not in the catalog
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Templates picked by rotating through the catalog
///
/// The rotation starts at `chapter * count` and wraps around the catalog, so
/// consecutive chapters spread their diagrams over every template.
pub fn rotate(catalog: &TemplateCatalog, chapter: ChapterId, count: usize) -> Vec<TemplateKind> {
    let offset = chapter.number() * count;
    (0..count).map(|i| catalog.at(offset + i)).collect()
}

/// Choose the templates to add to a chapter
///
/// An explicit list wins over rotation and is truncated to `count`. A list
/// shorter than `count` is used whole. Every name in the list must be in the
/// catalog, including names past `count`. Without a list, `count` must be
/// positive.
pub fn select_templates(
    catalog: &TemplateCatalog,
    chapter: ChapterId,
    count: Option<usize>,
    explicit: Option<&[String]>,
) -> Result<Vec<TemplateKind>, DistributionError> {
    if let Some(names) = explicit {
        if names.is_empty() {
            return Err(DistributionError::InvalidCount {
                chapter,
                reason: "explicit template list is empty".to_string(),
            });
        }
        let mut kinds = names
            .iter()
            .map(|name| catalog.lookup(name).map(|def| def.kind))
            .collect::<Result<Vec<_>, _>>()?;
        match count {
            Some(0) => {
                return Err(DistributionError::InvalidCount {
                    chapter,
                    reason: "count must be at least 1".to_string(),
                })
            }
            Some(n) => kinds.truncate(n),
            None => {}
        }
        return Ok(kinds);
    }

    match count {
        Some(n) if n > 0 => Ok(rotate(catalog, chapter, n)),
        Some(_) => Err(DistributionError::InvalidCount {
            chapter,
            reason: "count must be at least 1".to_string(),
        }),
        None => Err(DistributionError::InvalidCount {
            chapter,
            reason: "no count and no template list given".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chapter(s: &str) -> ChapterId {
        s.parse().unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rotation_chapter_three_count_four() {
        let catalog = TemplateCatalog::builtin();
        let templates = select_templates(&catalog, chapter("03"), Some(4), None).unwrap();
        assert_eq!(
            templates,
            vec![
                TemplateKind::Flowchart,
                TemplateKind::Sequence,
                TemplateKind::ConceptMap,
                TemplateKind::RadialConcept,
            ]
        );
    }

    #[test]
    fn test_rotation_is_deterministic() {
        let catalog = TemplateCatalog::builtin();
        let first = rotate(&catalog, chapter("11"), 5);
        let second = rotate(&catalog, chapter("11"), 5);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_rotation_wraps_around() {
        let catalog = TemplateCatalog::builtin();
        // 2 * 5 = 10, so the pass starts on the last template and wraps
        let templates = rotate(&catalog, chapter("02"), 5);
        assert_eq!(templates[0], TemplateKind::ClassDiagram);
        assert_eq!(templates[1], TemplateKind::Architecture);
    }

    #[test]
    fn test_rotation_longer_than_catalog() {
        let catalog = TemplateCatalog::builtin();
        let templates = rotate(&catalog, chapter("00"), 13);
        assert_eq!(templates.len(), 13);
        assert_eq!(templates[11], templates[0]);
    }

    #[test]
    fn test_explicit_list_truncated() {
        let catalog = TemplateCatalog::builtin();
        let list = names(&["gantt", "mindmap", "timeline"]);
        let templates =
            select_templates(&catalog, chapter("01"), Some(2), Some(list.as_slice())).unwrap();
        assert_eq!(templates, vec![TemplateKind::Gantt, TemplateKind::Mindmap]);
    }

    #[test]
    fn test_explicit_list_shorter_than_count_used_whole() {
        let catalog = TemplateCatalog::builtin();
        let list = names(&["architecture"]);
        let templates =
            select_templates(&catalog, chapter("05"), Some(4), Some(list.as_slice())).unwrap();
        assert_eq!(templates, vec![TemplateKind::Architecture]);
    }

    #[test]
    fn test_explicit_list_unknown_template() {
        let catalog = TemplateCatalog::builtin();
        let list = names(&["flowchart", "pie-chart"]);
        let result = select_templates(&catalog, chapter("01"), Some(2), Some(list.as_slice()));
        assert!(matches!(
            result,
            Err(DistributionError::Template(TemplateError::UnknownTemplate { .. }))
        ));
    }

    #[test]
    fn test_unknown_template_beyond_count_rejected() {
        let catalog = TemplateCatalog::builtin();
        let list = names(&["flowchart", "pie-chart"]);
        let result = select_templates(&catalog, chapter("01"), Some(1), Some(list.as_slice()));
        assert!(matches!(
            result,
            Err(DistributionError::Template(TemplateError::UnknownTemplate { ref name, .. }))
                if name == "pie-chart"
        ));
    }

    #[test]
    fn test_missing_count_rejected() {
        let catalog = TemplateCatalog::builtin();
        let result = select_templates(&catalog, chapter("01"), None, None);
        assert!(matches!(result, Err(DistributionError::InvalidCount { .. })));
    }

    #[test]
    fn test_zero_count_rejected() {
        let catalog = TemplateCatalog::builtin();
        let result = select_templates(&catalog, chapter("01"), Some(0), None);
        assert!(matches!(result, Err(DistributionError::InvalidCount { .. })));
    }

    #[test]
    fn test_empty_explicit_list_rejected() {
        let catalog = TemplateCatalog::builtin();
        let empty: Vec<String> = Vec::new();
        let result = select_templates(&catalog, chapter("01"), Some(2), Some(empty.as_slice()));
        assert!(matches!(result, Err(DistributionError::InvalidCount { .. })));
    }
}
