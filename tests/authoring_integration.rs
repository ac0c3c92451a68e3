//! Integration tests for adding diagrams to chapter manifests

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

use chapter_diagrams::{
    AuthorError, Authoring, AuthoringConfig, ChapterId, ChapterRequest, ContentStrategy, Diagram,
    DistributionPlan, ManifestError, OutputTarget, TemplateCatalog, TemplateKind,
};

const EXISTING: &str = r#"{
  "title": "Agents in Practice",
  "diagrams": [
    {
      "template": "architecture",
      "placeholders": { "SYSTEM_NAME": "Hand written" }
    },
    {
      "template": "legacy-art",
      "placeholders": {}
    }
  ]
}"#;

fn chapter(s: &str) -> ChapterId {
    s.parse().unwrap()
}

/// Create a chapter source and manifest under `root`
fn seed_chapter(root: &Path, ch: &str, manifest: &str) {
    fs::create_dir_all(root.join("chapters")).unwrap();
    fs::write(
        root.join(format!("chapters/chapter-{ch}.md")),
        format!("# Chapter {ch}\n\nSome prose.\n"),
    )
    .unwrap();
    let dir = root.join(format!("diagrams/chapter-{ch}"));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("content.json"), manifest).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn manifest_path(root: &Path, ch: &str, file: &str) -> std::path::PathBuf {
    root.join(format!("diagrams/chapter-{ch}/{file}"))
}

#[test]
fn test_append_only() {
    let dir = TempDir::new().unwrap();
    seed_chapter(dir.path(), "05", EXISTING);
    let authoring = Authoring::new(AuthoringConfig::new(dir.path()));

    let report = authoring
        .add_diagrams(&ChapterRequest::new(chapter("05")))
        .expect("Should add");

    let original: Value = serde_json::from_str(EXISTING).unwrap();
    let written = read_json(&manifest_path(dir.path(), "05", "content.json"));
    let after = written["diagrams"].as_array().unwrap();

    assert_eq!(report.existing, 2);
    assert_eq!(after.len(), 6);
    assert_eq!(&after[..2], original["diagrams"].as_array().unwrap().as_slice());
    let appended: Vec<&str> = after[2..]
        .iter()
        .map(|e| e["template"].as_str().unwrap())
        .collect();
    // 5 * 4 = 20, so rotation starts at the tenth template and wraps
    assert_eq!(appended, vec!["mindmap", "class-diagram", "architecture", "flowchart"]);
    assert_eq!(written["title"], json!("Agents in Practice"));
}

#[test]
fn test_new_entries_carry_exact_catalog_keys() {
    let dir = TempDir::new().unwrap();
    seed_chapter(dir.path(), "11", r#"{"diagrams": []}"#);
    let authoring = Authoring::new(AuthoringConfig::new(dir.path()));
    authoring
        .add_diagrams(&ChapterRequest::new(chapter("11")))
        .expect("Should add");

    let catalog = TemplateCatalog::builtin();
    let written = read_json(&manifest_path(dir.path(), "11", "content.json"));
    for entry in written["diagrams"].as_array().unwrap() {
        let def = catalog
            .lookup(entry["template"].as_str().unwrap())
            .expect("Known template");
        let keys: Vec<&str> = entry["placeholders"]
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(keys, def.placeholder_keys());
    }
}

#[test]
fn test_explicit_override_truncated() {
    let dir = TempDir::new().unwrap();
    seed_chapter(dir.path(), "01", r#"{"diagrams": []}"#);
    let authoring = Authoring::new(AuthoringConfig::new(dir.path()));

    // Chapter 01 is planned for two diagrams
    let request = ChapterRequest::new(chapter("01")).with_templates(vec![
        "timeline".to_string(),
        "gantt".to_string(),
        "mindmap".to_string(),
    ]);
    let report = authoring.add_diagrams(&request).expect("Should add");
    assert_eq!(report.added, vec![TemplateKind::Timeline, TemplateKind::Gantt]);

    let written = read_json(&manifest_path(dir.path(), "01", "content.json"));
    assert_eq!(written["diagrams"].as_array().unwrap().len(), 2);
}

#[test]
fn test_unknown_template_leaves_files_untouched() {
    let dir = TempDir::new().unwrap();
    seed_chapter(dir.path(), "02", EXISTING);
    let authoring = Authoring::new(AuthoringConfig::new(dir.path()));

    let request = ChapterRequest::new(chapter("02"))
        .with_templates(vec!["flowchart".to_string(), "pie-chart".to_string()]);
    let err = authoring.add_diagrams(&request).unwrap_err();

    assert!(err.is_unknown_template());
    assert_eq!(
        fs::read_to_string(manifest_path(dir.path(), "02", "content.json")).unwrap(),
        EXISTING
    );
    assert!(!manifest_path(dir.path(), "02", "content-enhanced.json").exists());
}

#[test]
fn test_unknown_template_past_count_rejected() {
    let dir = TempDir::new().unwrap();
    seed_chapter(dir.path(), "01", EXISTING);
    let authoring = Authoring::new(AuthoringConfig::new(dir.path()));

    // Chapter 01 is planned for two diagrams; the bad name sits third
    let request = ChapterRequest::new(chapter("01")).with_templates(vec![
        "flowchart".to_string(),
        "sequence".to_string(),
        "pie-chart".to_string(),
    ]);
    let err = authoring.add_diagrams(&request).unwrap_err();

    assert!(err.is_unknown_template());
    assert_eq!(
        fs::read_to_string(manifest_path(dir.path(), "01", "content.json")).unwrap(),
        EXISTING
    );
}

#[test]
fn test_failed_write_leaves_manifest_untouched() {
    let dir = TempDir::new().unwrap();
    seed_chapter(dir.path(), "06", EXISTING);
    // A directory where the enhanced manifest should go cannot be replaced
    let blocked = manifest_path(dir.path(), "06", "content-enhanced.json");
    fs::create_dir_all(blocked.join("occupied")).unwrap();
    let authoring = Authoring::new(AuthoringConfig::new(dir.path()));

    let request = ChapterRequest::new(chapter("06")).with_target(OutputTarget::Enhanced);
    let err = authoring.add_diagrams(&request).unwrap_err();

    assert!(
        matches!(err, AuthorError::Manifest(ManifestError::Write { .. })),
        "unexpected error: {err:?}"
    );
    assert_eq!(
        fs::read_to_string(manifest_path(dir.path(), "06", "content.json")).unwrap(),
        EXISTING
    );
    assert!(blocked.is_dir());
    assert!(!manifest_path(dir.path(), "06", "content-enhanced.json.tmp").exists());
}

#[test]
fn test_missing_manifest_reported() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("chapters")).unwrap();
    fs::write(dir.path().join("chapters/chapter-04.md"), "# Four\n").unwrap();
    let authoring = Authoring::new(AuthoringConfig::new(dir.path()));

    let err = authoring
        .add_diagrams(&ChapterRequest::new(chapter("04")))
        .unwrap_err();
    assert!(err.is_manifest_not_found());
}

#[test]
fn test_batch_isolates_failures() {
    let dir = TempDir::new().unwrap();
    let plan = DistributionPlan::from_str(
        r#"
[chapters]
03 = ["timeline", "flowchart"]
04 = ["gantt"]
05 = ["mindmap", "sequence"]
06 = 3
"#,
    )
    .unwrap();
    seed_chapter(dir.path(), "03", r#"{"diagrams": []}"#);
    seed_chapter(dir.path(), "05", EXISTING);
    // Chapter 04 has a source but no manifest
    fs::write(dir.path().join("chapters/chapter-04.md"), "# Four\n").unwrap();

    let config = AuthoringConfig::new(dir.path()).with_plan(plan);
    let report = Authoring::new(config).run_batch(OutputTarget::Enhanced);

    let succeeded: Vec<String> = report.succeeded.iter().map(|r| r.chapter.to_string()).collect();
    assert_eq!(succeeded, vec!["03", "05"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].chapter, chapter("04"));
    assert!(report.failed[0].error.is_manifest_not_found());

    // Enhanced copies written, canonical manifests untouched
    let enhanced = read_json(&manifest_path(dir.path(), "05", "content-enhanced.json"));
    assert_eq!(enhanced["diagrams"].as_array().unwrap().len(), 4);
    assert_eq!(
        fs::read_to_string(manifest_path(dir.path(), "05", "content.json")).unwrap(),
        EXISTING
    );
    // Count-only chapters are not part of batch runs
    assert!(!manifest_path(dir.path(), "06", "content-enhanced.json").exists());
}

#[test]
fn test_rotation_is_reproducible_across_runs() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    for dir in [&first, &second] {
        seed_chapter(dir.path(), "03", r#"{"diagrams": []}"#);
        let request = ChapterRequest::new(chapter("03")).with_target(OutputTarget::Enhanced);
        Authoring::new(AuthoringConfig::new(dir.path()))
            .add_diagrams(&request)
            .expect("Should add");
    }

    let a = fs::read_to_string(manifest_path(first.path(), "03", "content-enhanced.json")).unwrap();
    let b = fs::read_to_string(manifest_path(second.path(), "03", "content-enhanced.json")).unwrap();
    assert_eq!(a, b);

    let written = read_json(&manifest_path(first.path(), "03", "content-enhanced.json"));
    let templates: Vec<String> = written["diagrams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["template"].as_str().unwrap().to_string())
        .collect();
    insta::assert_snapshot!(templates.join(", "), @"flowchart, sequence, concept-map, radial-concept");
}

#[test]
fn test_content_strategy_fills_placeholders() {
    struct TitleFromHeading;

    impl ContentStrategy for TitleFromHeading {
        fn generate(&self, template: TemplateKind, chapter_text: &str) -> Option<Diagram> {
            let heading = chapter_text.lines().next()?.trim_start_matches("# ");
            match template {
                TemplateKind::Timeline => {
                    let mut fields = chapter_diagrams::template::TimelinePlaceholders::default();
                    fields.timeline_title = heading.to_string();
                    Some(Diagram::Timeline(fields))
                }
                _ => None,
            }
        }
    }

    let dir = TempDir::new().unwrap();
    seed_chapter(dir.path(), "13", r#"{"diagrams": []}"#);
    let strategy = TitleFromHeading;
    let authoring = Authoring::new(AuthoringConfig::new(dir.path())).with_strategy(&strategy);
    authoring
        .add_diagrams(&ChapterRequest::new(chapter("13")).with_planned_list(true))
        .expect("Should add");

    let written = read_json(&manifest_path(dir.path(), "13", "content.json"));
    assert_eq!(
        written["diagrams"][0]["placeholders"]["TIMELINE_TITLE"],
        json!("Chapter 13")
    );
    assert_eq!(
        written["diagrams"][1]["placeholders"]["START_LABEL"],
        json!("Start")
    );
}

#[test]
fn test_check_reports_nonconforming_entries() {
    let dir = TempDir::new().unwrap();
    seed_chapter(dir.path(), "07", EXISTING);
    let authoring = Authoring::new(AuthoringConfig::new(dir.path()));
    authoring
        .add_diagrams(&ChapterRequest::new(chapter("07")))
        .expect("Should add");

    let issues = authoring.check_chapter(chapter("07")).expect("Should check");
    let indices: Vec<usize> = issues.iter().map(|i| i.index).collect();
    // The hand-written architecture entry is incomplete and legacy-art is unknown
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn test_custom_layout() {
    let dir = TempDir::new().unwrap();
    let config = AuthoringConfig::from_toml(
        dir.path(),
        r#"
[paths]
chapters_dir = "src"
diagrams_dir = "figures"
manifest_file = "diagrams.json"

[chapters]
01 = ["comparison"]
"#,
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/chapter-01.md"), "# One\n").unwrap();
    fs::create_dir_all(dir.path().join("figures/chapter-01")).unwrap();
    fs::write(
        dir.path().join("figures/chapter-01/diagrams.json"),
        r#"{"diagrams": []}"#,
    )
    .unwrap();

    let report = Authoring::new(config)
        .add_diagrams(&ChapterRequest::new(chapter("01")).with_planned_list(true))
        .expect("Should add");
    assert_eq!(report.path, dir.path().join("figures/chapter-01/diagrams.json"));
    let written = read_json(&report.path);
    assert_eq!(written["diagrams"][0]["placeholders"]["X_2"], json!(0.6));
}
