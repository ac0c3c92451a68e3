//! Chapter manifests: the per-chapter `content.json` files listing diagrams

mod atomic;
mod document;
mod store;

pub use atomic::atomic_write;
pub use document::{ChapterManifest, EntryIssue, ManifestFormatError};
pub use store::{ManifestError, ManifestStore, OutputTarget};
