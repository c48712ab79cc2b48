//! File IO: atomic save via `<path>.tmp` + rename. Structured result enums,
//! not bare `Result`, mirroring the teacher's `OpenFileResult`/
//! `WriteFileResult` pattern so callers can toast on the exact failure mode.

use core_model::Tab;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why an atomic save failed, distinguishing the write-to-`.tmp` step from
/// the rename-into-place step since only the latter can leave the real path
/// untouched on failure.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("failed to move {path} into place: {source}")]
    Rename { path: PathBuf, source: std::io::Error },
}

#[derive(Debug)]
pub enum SaveResult {
    Success,
    NoPath,
    Error(SaveError),
}

/// Save `tab`'s document to its bound path, if any. Writes UTF-8 content to
/// `<path>.tmp` and renames over the destination, so a crash or power loss
/// mid-write never leaves a half-written file at the real path.
pub fn save_tab(tab: &Tab) -> SaveResult {
    let Some(path) = tab.path() else {
        return SaveResult::NoPath;
    };
    match write_atomic(path, &tab.document().to_content_string()) {
        Ok(()) => {
            tracing::info!(target: "io", path = %path.display(), "file_saved");
            SaveResult::Success
        }
        Err(e) => {
            tracing::error!(target: "io", path = %path.display(), error = %e, "file_write_error");
            SaveResult::Error(e)
        }
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), SaveError> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    std::fs::write(&tmp_path, content.as_bytes()).map_err(|source| SaveError::Write {
        path: tmp_path.clone(),
        source,
    })?;
    std::fs::rename(&tmp_path, path).map_err(|source| SaveError::Rename {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_without_path_reports_no_path() {
        let tab = Tab::new("new tab");
        assert!(matches!(save_tab(&tab), SaveResult::NoPath));
    }

    #[test]
    fn save_writes_through_a_tmp_file_and_renames_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut tab = Tab::open_or_empty(&path);
        tab.set_path(&path);
        tab.insert_rune('a');
        tab.insert_rune('b');
        let result = save_tab(&tab);
        assert!(matches!(result, SaveResult::Success));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ab");
        let mut tmp_name = path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        assert!(!std::path::Path::new(&tmp_name).exists());
    }

    #[test]
    fn save_of_empty_document_creates_an_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.txt");
        let mut tab = Tab::open_or_empty(&path);
        tab.set_path(&path);
        assert!(matches!(save_tab(&tab), SaveResult::Success));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
