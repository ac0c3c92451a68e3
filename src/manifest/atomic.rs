//! Whole-file replacement via write-then-rename

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Sibling path the content is staged in before the rename
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

/// Write `content` to `path` so readers see either the old file or the new one
///
/// The content is written to a temporary file in the same directory, synced,
/// and renamed over the target. Parent directories are created if missing.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = staging_path(path);
    if let Err(e) = write_synced(&temp_path, content).and_then(|()| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}
