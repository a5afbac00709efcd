//! Locates the analyzer folder of a Unity project

use std::path::{Path, PathBuf};

/// An analyzer folder that existed when it was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerDirectory {
    path: PathBuf,
}

impl AnalyzerDirectory {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Resolves `relative_path` against `project_root`.
///
/// An absolute `relative_path` is used as is. Returns `None` (and logs a warning)
/// when the directory does not exist, so callers can skip analyzer injection
/// without failing the pass.
pub fn resolve(project_root: &Path, relative_path: &Path) -> Option<AnalyzerDirectory> {
    let path = project_root.join(relative_path);
    if !path.is_dir() {
        log::warn!(
            "Directory {} does not exist, please place analyzers in correct location.",
            path.display()
        );
        return None;
    }
    Some(AnalyzerDirectory { path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{capture_logs, warnings};
    use tempfile::TempDir;

    #[test]
    fn test_resolve_existing_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("Packages/Analyzers")).unwrap();

        let resolved = resolve(temp_dir.path(), Path::new("Packages/Analyzers")).unwrap();
        assert_eq!(resolved.path(), temp_dir.path().join("Packages/Analyzers"));
    }

    #[test]
    fn test_resolve_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(resolve(temp_dir.path(), Path::new("Packages/Analyzers")), None);
    }

    #[test]
    fn test_resolve_missing_directory_warns_once() {
        let temp_dir = TempDir::new().unwrap();
        let (resolved, records) = capture_logs(|| resolve(temp_dir.path(), Path::new("Packages/Analyzers")));

        assert_eq!(resolved, None);
        let warnings = warnings(&records);
        assert_eq!(warnings.len(), 1);
        let missing = temp_dir.path().join("Packages/Analyzers");
        assert!(warnings[0].contains(&missing.display().to_string()), "got: {}", warnings[0]);
    }

    #[test]
    fn test_resolve_existing_directory_does_not_warn() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("Analyzers")).unwrap();

        let (_, records) = capture_logs(|| resolve(temp_dir.path(), Path::new("Analyzers")));
        assert!(warnings(&records).is_empty());
    }

    #[test]
    fn test_resolve_file_is_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("Analyzers"), b"").unwrap();
        assert_eq!(resolve(temp_dir.path(), Path::new("Analyzers")), None);
    }

    #[test]
    fn test_resolve_absolute_path() {
        let project = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();

        let resolved = resolve(project.path(), elsewhere.path()).unwrap();
        assert_eq!(resolved.path(), elsewhere.path());
    }
}
