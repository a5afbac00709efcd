//! Project file generation pass
//!
//! Customizes Unity generated project files with Roslyn analyzers and a fixed C# version.
//! The pass is a plain function of project name and project text; [`ProjectFilesGenerator::into_hook`]
//! turns it into a value any host can register.

use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{IoContext, ProjectFileResult};
use crate::settings::GenerationSettings;
use super::asset_classifier::classify;
use super::constants::PROJECT_FILE_EXTENSION;
use super::document::ProjectDocument;
use super::lang_version::stamp_version;
use super::path_resolver::resolve;
use super::reference_injector::{inject, inject_missing};

/// A registered project file transformation: `(project name, project text) -> project text`
pub type ProjectFileHook = Box<dyn Fn(&str, &str) -> ProjectFileResult<String> + Send + Sync>;

/// How analyzer references meet the ones a project file already has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReferenceMode {
    /// Always append a fresh group, for text Unity just regenerated
    Append,
    /// Only add what is not referenced yet, for files that may have been processed before
    SkipExisting,
}

#[derive(Debug, Clone)]
pub struct ProjectFilesGenerator {
    project_root: PathBuf,
    settings: GenerationSettings,
}

impl ProjectFilesGenerator {
    /// Creates a generator for the Unity project at `project_root`.
    ///
    /// Analyzer paths written into project files are relative to `project_root`.
    pub fn new(project_root: PathBuf, settings: GenerationSettings) -> Self {
        Self { project_root, settings }
    }

    /// Runs the pass over one project file's text
    pub fn generate(&self, name: &str, content: &str) -> ProjectFileResult<String> {
        self.generate_with(name, content, ReferenceMode::Append)
    }

    fn generate_with(&self, name: &str, content: &str, mode: ReferenceMode) -> ProjectFileResult<String> {
        log::debug!("Generating project file {}", name);
        let mut doc = ProjectDocument::parse(content)?;
        self.upgrade_with(&mut doc, mode);
        doc.serialize()
    }

    /// Adds the analyzers, then stamps the language version
    pub fn upgrade_project(&self, doc: &mut ProjectDocument) {
        self.upgrade_with(doc, ReferenceMode::Append);
    }

    fn upgrade_with(&self, doc: &mut ProjectDocument, mode: ReferenceMode) {
        self.add_roslyn_analyzers(doc, mode);
        let stamped = stamp_version(doc, &self.settings.lang_version);
        log::debug!("Set LangVersion {} in {} property groups", self.settings.lang_version, stamped);
    }

    fn add_roslyn_analyzers(&self, doc: &mut ProjectDocument, mode: ReferenceMode) {
        let Some(directory) = resolve(&self.project_root, &self.settings.analyzer_directory) else {
            return;
        };
        let entries = classify(&directory, &self.project_root);
        match mode {
            ReferenceMode::Append => inject(doc, entries),
            ReferenceMode::SkipExisting => {
                let added = inject_missing(doc, entries);
                log::debug!("Added {} analyzer references", added);
            }
        }
    }

    /// Wraps the pass in a boxed function value
    pub fn into_hook(self) -> ProjectFileHook {
        Box::new(move |name: &str, content: &str| self.generate(name, content))
    }

    /// Runs the pass over a project file on disk, named after its file stem.
    ///
    /// Analyzers and additional files the file already references are not added again,
    /// so processing a file twice is a no-op. The file is only written when the text
    /// changed. Returns whether it was written.
    pub fn process_file(&self, path: &Path) -> ProjectFileResult<bool> {
        let content = fs::read_to_string(path)
            .with_io_context(&format!("Failed to read project file {}", path.display()))?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        let generated = self.generate_with(name, &content, ReferenceMode::SkipExisting)?;
        if generated == content {
            log::info!("Project file {} is up to date", path.display());
            return Ok(false);
        }

        fs::write(path, &generated)
            .with_io_context(&format!("Failed to write project file {}", path.display()))?;
        log::info!("Updated project file {}", path.display());
        Ok(true)
    }
}

/// Finds the `.csproj` files directly inside a Unity project root, sorted by path
pub fn find_project_files(project_root: &Path) -> ProjectFileResult<Vec<PathBuf>> {
    let mut project_files = Vec::new();

    let entries = fs::read_dir(project_root)
        .with_io_context("Failed to read Unity project directory")?;
    for entry in entries {
        let path = entry.with_io_context("Failed to read Unity project directory entry")?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(PROJECT_FILE_EXTENSION) {
            project_files.push(path);
        }
    }

    project_files.sort();
    Ok(project_files)
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
