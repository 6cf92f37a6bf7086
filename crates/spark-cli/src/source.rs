//! Filesystem inputs and outputs

use crate::error::{Result, ScribeError};
use spark_reputation::{Ledger, LedgerLoad};
use std::path::{Path, PathBuf};

/// Markdown files directly inside `dir`, sorted by path
///
/// # Errors
///
/// Returns [`ScribeError::InputUnreadable`] when the directory cannot be listed.
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ScribeError::unreadable(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ScribeError::unreadable(dir, e))?.path();
        let is_markdown = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        if is_markdown && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read a UTF-8 document
///
/// # Errors
///
/// Returns [`ScribeError::InputUnreadable`].
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ScribeError::unreadable(path, e))
}

/// Read and validate a ledger file
///
/// # Errors
///
/// Returns [`ScribeError::InputUnreadable`] or [`ScribeError::Ledger`].
pub fn read_ledger(path: &Path) -> Result<LedgerLoad> {
    Ok(Ledger::from_json_str(&read_text(path)?)?)
}

/// Write to `path`, or stdout when `None`
///
/// # Errors
///
/// Returns [`ScribeError::OutputUnwritable`].
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text).map_err(|e| ScribeError::unwritable(path, e))?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_markdown_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.md"), "# B").unwrap();
        std::fs::write(dir.path().join("a.MD"), "# A").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested.md")).unwrap();

        let names: Vec<_> = markdown_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.MD", "b.md"]);
    }

    #[test]
    fn missing_input_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let error = read_text(&dir.path().join("absent.md")).unwrap_err();
        assert!(matches!(error, ScribeError::InputUnreadable { .. }));
    }
}
