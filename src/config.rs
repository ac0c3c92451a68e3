//! Configuration for authoring runs
//!
//! A config file is optional. It may override the book's directory layout and
//! the distribution plan:
//!
//! ```toml
//! [paths]
//! diagrams_dir = "figures"
//!
//! [chapters]
//! 01 = 2
//! 02 = ["timeline", "gantt"]
//! ```
//!
//! Omitted sections fall back to the defaults. The book root is never read
//! from the file; it is always passed in by the caller.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::plan::{DistributionPlan, PlanError, TomlAllocation};

/// Errors that can occur when loading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid distribution plan: {0}")]
    Plan(#[from] PlanError),
}

/// Where chapter sources and manifests live, relative to the book root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookLayout {
    /// Directory holding `chapter-NN.md`
    pub chapters_dir: PathBuf,
    /// Directory holding one `chapter-NN/` folder per chapter
    pub diagrams_dir: PathBuf,
    /// Canonical manifest file name
    pub manifest_file: String,
    /// Review copy written instead of the canonical manifest
    pub enhanced_file: String,
}

impl Default for BookLayout {
    fn default() -> Self {
        Self {
            chapters_dir: PathBuf::from("chapters"),
            diagrams_dir: PathBuf::from("diagrams"),
            manifest_file: "content.json".to_string(),
            enhanced_file: "content-enhanced.json".to_string(),
        }
    }
}

/// TOML structure for deserializing config files
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    paths: Option<BookLayout>,
    chapters: Option<BTreeMap<String, TomlAllocation>>,
}

/// Configuration for a complete authoring run
#[derive(Debug, Clone)]
pub struct AuthoringConfig {
    /// Book root directory
    pub root: PathBuf,
    /// Directory layout under the root
    pub layout: BookLayout,
    /// Chapter allocations
    pub plan: DistributionPlan,
}

impl AuthoringConfig {
    /// Create a configuration with the default layout and plan
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            layout: BookLayout::default(),
            plan: DistributionPlan::default(),
        }
    }

    /// Load overrides from a TOML config file
    pub fn from_file(root: impl Into<PathBuf>, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(root, &content)
    }

    /// Load overrides from a TOML string
    pub fn from_toml(root: impl Into<PathBuf>, content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::new(root);
        if let Some(layout) = parsed.paths {
            config.layout = layout;
        }
        if let Some(chapters) = parsed.chapters {
            config.plan = DistributionPlan::from_table(chapters)?;
        }
        Ok(config)
    }

    /// Set the directory layout
    pub fn with_layout(mut self, layout: BookLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the distribution plan
    pub fn with_plan(mut self, plan: DistributionPlan) -> Self {
        self.plan = plan;
        self
    }
}
