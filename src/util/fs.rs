//! Filesystem helpers with path-carrying errors.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Read a text file.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Replace `path` with `contents`, creating parent directories.
///
/// The text goes to a sibling `.tmp` file first and is renamed into place.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    let staging = staging_path(path);
    fs::write(&staging, contents)
        .with_context(|| format!("failed to write file: {}", staging.display()))?;
    fs::rename(&staging, path).with_context(|| {
        let _ = fs::remove_file(&staging);
        format!("failed to replace file: {}", path.display())
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_string_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/Makefile");

        write_string(&path, "first").unwrap();
        write_string(&path, "second").unwrap();

        assert_eq!(read_to_string(&path).unwrap(), "second");
        assert!(!tmp.path().join("nested/Makefile.tmp").exists());
    }

    #[test]
    fn test_staging_path() {
        assert_eq!(
            staging_path(Path::new("/b/Makefile")),
            PathBuf::from("/b/Makefile.tmp")
        );
    }

    #[test]
    fn test_read_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_to_string(&tmp.path().join("missing.mk")).unwrap_err();
        assert!(err.to_string().contains("failed to read file"));
    }
}
