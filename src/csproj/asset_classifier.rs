//! Classifies the files of an analyzer folder by extension

use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use super::constants::{ADDITIONAL_FILE_EXTENSION, ANALYZER_EXTENSION, RULESET_EXTENSION};
use super::path_resolver::AnalyzerDirectory;

/// How a file in the analyzer folder ends up in the project file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// `.dll`, referenced as `<Analyzer>`
    AnalyzerBinary,
    /// `.json`, referenced as `<AdditionalFiles>`
    AdditionalFile,
    /// `.ruleset`, assigned to `CodeAnalysisRuleSet`
    RulesetFile,
}

impl AssetKind {
    /// Maps a file extension (without the dot) to a kind. Matching is case-sensitive.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            ANALYZER_EXTENSION => Some(AssetKind::AnalyzerBinary),
            ADDITIONAL_FILE_EXTENSION => Some(AssetKind::AdditionalFile),
            RULESET_EXTENSION => Some(AssetKind::RulesetFile),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub kind: AssetKind,
    /// Path relative to the root given to [`classify`]
    pub relative_path: PathBuf,
}

impl AssetEntry {
    /// The path as written into an `Include` attribute or property value
    pub fn include_path(&self) -> String {
        self.relative_path.to_string_lossy().into_owned()
    }
}

/// Lazily walks `directory` recursively and yields every file with a known extension.
///
/// Paths are made relative to `relative_to` (normally the project root) and use the
/// platform's separator throughout; files outside of it keep their full path. Entries are
/// visited sorted by file name within each directory. Each call walks the file system again.
pub fn classify<'a>(
    directory: &AnalyzerDirectory,
    relative_to: &'a Path,
) -> impl Iterator<Item = AssetEntry> + 'a {
    WalkDir::new(directory.path())
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable analyzer folder entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| {
            let kind = entry
                .path()
                .extension()
                .and_then(|s| s.to_str())
                .and_then(AssetKind::from_extension)?;
            // Rebuilt from components so separators are uniform and `.` segments vanish
            let relative_path: PathBuf = entry
                .path()
                .strip_prefix(relative_to)
                .unwrap_or(entry.path())
                .components()
                .collect();
            Some(AssetEntry { kind, relative_path })
        })
}
