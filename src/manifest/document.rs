//! In-memory chapter manifest

use serde_json::{Map, Value};
use thiserror::Error;

use crate::template::Diagram;

/// Ways a manifest file can fail to be a manifest
#[derive(Debug, Error)]
pub enum ManifestFormatError {
    #[error("not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("top level is not a JSON object")]
    NotAnObject,
    #[error("missing 'diagrams' field")]
    MissingDiagrams,
    #[error("'diagrams' is not an array")]
    DiagramsNotArray,
}

/// A manifest entry that does not match its catalog template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIssue {
    /// Position in the `diagrams` array
    pub index: usize,
    /// Template name as written in the entry, if any
    pub template: Option<String>,
    pub message: String,
}

/// A chapter's diagram manifest
///
/// Holds the whole JSON document so that keys other than `diagrams`, and every
/// existing entry, are written back untouched and in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterManifest {
    document: Map<String, Value>,
}

impl Default for ChapterManifest {
    fn default() -> Self {
        let mut document = Map::new();
        document.insert("diagrams".to_string(), Value::Array(Vec::new()));
        Self { document }
    }
}

impl ChapterManifest {
    /// An empty manifest with no diagrams
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse manifest JSON, requiring an object with a `diagrams` array
    pub fn parse(text: &str) -> Result<Self, ManifestFormatError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(document) => match document.get("diagrams") {
                Some(Value::Array(_)) => Ok(Self { document }),
                Some(_) => Err(ManifestFormatError::DiagramsNotArray),
                None => Err(ManifestFormatError::MissingDiagrams),
            },
            _ => Err(ManifestFormatError::NotAnObject),
        }
    }

    /// Existing diagram entries, in rendering order
    pub fn diagrams(&self) -> &[Value] {
        self.document
            .get("diagrams")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.diagrams().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams().is_empty()
    }

    /// Append entries after the existing ones
    ///
    /// Entries are serialized before any is appended, so a failure leaves the
    /// manifest unchanged.
    pub fn append(&mut self, entries: &[Diagram]) -> serde_json::Result<()> {
        let values = entries
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;

        if let Some(Value::Array(list)) = self.document.get_mut("diagrams") {
            list.extend(values);
        }
        Ok(())
    }

    /// Indented JSON with a trailing newline
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut text = serde_json::to_string_pretty(&self.document)?;
        text.push('\n');
        Ok(text)
    }

    /// Check every entry against the template catalog
    pub fn check(&self) -> Vec<EntryIssue> {
        self.diagrams()
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let template = entry
                    .get("template")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                serde_json::from_value::<Diagram>(entry.clone())
                    .err()
                    .map(|e| EntryIssue {
                        index,
                        template,
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SAMPLE: &str = r#"{
  "chapter": "Getting Started",
  "diagrams": [
    { "template": "custom", "placeholders": { "A": "b" } }
  ],
  "notes": "keep me"
}"#;

    #[test]
    fn test_parse_keeps_fields() {
        let manifest = ChapterManifest::parse(SAMPLE).expect("Should parse");
        assert_eq!(manifest.len(), 1);
        let text = manifest.to_pretty_json().expect("Should encode");
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed["notes"], json!("keep me"));
        assert_eq!(reparsed["chapter"], json!("Getting Started"));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let result = ChapterManifest::parse("[1, 2]");
        assert!(matches!(result, Err(ManifestFormatError::NotAnObject)));
    }

    #[test]
    fn test_parse_rejects_missing_diagrams() {
        let result = ChapterManifest::parse(r#"{"title": "x"}"#);
        assert!(matches!(result, Err(ManifestFormatError::MissingDiagrams)));
    }

    #[test]
    fn test_parse_rejects_non_array_diagrams() {
        let result = ChapterManifest::parse(r#"{"diagrams": {}}"#);
        assert!(matches!(result, Err(ManifestFormatError::DiagramsNotArray)));
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        let result = ChapterManifest::parse("{ not json");
        assert!(matches!(result, Err(ManifestFormatError::Json(_))));
    }

    #[test]
    fn test_append_preserves_existing_entries() {
        let mut manifest = ChapterManifest::parse(SAMPLE).expect("Should parse");
        let before = manifest.diagrams().to_vec();
        manifest
            .append(&[
                Diagram::defaults(TemplateKind::Gantt),
                Diagram::defaults(TemplateKind::Mindmap),
            ])
            .expect("Should append");

        assert_eq!(manifest.len(), 3);
        assert_eq!(&manifest.diagrams()[..1], before.as_slice());
        assert_eq!(manifest.diagrams()[1]["template"], json!("gantt"));
        assert_eq!(manifest.diagrams()[2]["template"], json!("mindmap"));
    }

    #[test]
    fn test_pretty_json_keeps_key_order() {
        let manifest = ChapterManifest::parse(SAMPLE).expect("Should parse");
        let text = manifest.to_pretty_json().expect("Should serialize");
        let chapter = text.find("\"chapter\"").expect("chapter key");
        let diagrams = text.find("\"diagrams\"").expect("diagrams key");
        let notes = text.find("\"notes\"").expect("notes key");
        assert!(chapter < diagrams && diagrams < notes);
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"chapter\""));
    }

    #[test]
    fn test_check_flags_unknown_and_incomplete_entries() {
        let mut manifest = ChapterManifest::parse(SAMPLE).expect("Should parse");
        manifest
            .append(&[Diagram::defaults(TemplateKind::Flowchart)])
            .expect("Should append");
        let issues = manifest.check();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].index, 0);
        assert_eq!(issues[0].template.as_deref(), Some("custom"));
    }

    #[test]
    fn test_new_manifest_is_empty() {
        let manifest = ChapterManifest::new();
        assert!(manifest.is_empty());
        assert_eq!(
            manifest.to_pretty_json().expect("Should serialize"),
            "{\n  \"diagrams\": []\n}\n"
        );
    }
}
