//! Generation settings, optionally read from `CsprojAnalyzers.json` in the Unity project root

use std::fs;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use crate::error::{IoContext, ProjectFileError, ProjectFileResult};

/// Name of the optional settings file in the Unity project root
pub const SETTINGS_FILE_NAME: &str = "CsprojAnalyzers.json";

/// Analyzer folder used when no settings file overrides it
pub const DEFAULT_ANALYZER_DIRECTORY: &str = "Packages/com.bovinelabs.analyzers/Analyzers/RoslynAnalyzers";

/// C# version written into configuration scoped property groups by default
pub const DEFAULT_LANG_VERSION: &str = "7.3";

/// Settings for one generation pass. Missing keys fall back to the defaults.
///
/// ```json
/// { "analyzerDirectory": "Packages/MyAnalyzers", "langVersion": "9.0" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    /// Folder scanned for analyzers, relative to the project root unless absolute
    pub analyzer_directory: PathBuf,
    /// Value of the `LangVersion` property
    pub lang_version: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            analyzer_directory: PathBuf::from(DEFAULT_ANALYZER_DIRECTORY),
            lang_version: DEFAULT_LANG_VERSION.to_string(),
        }
    }
}

impl GenerationSettings {
    /// Reads settings from a JSON file
    pub fn load(path: &Path) -> ProjectFileResult<Self> {
        let content = fs::read_to_string(path)
            .with_io_context(&format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&content).map_err(|e| ProjectFileError::Settings {
            file: path.to_path_buf(),
            message: "Failed to parse settings".to_string(),
            source: e,
        })
    }

    /// Reads `CsprojAnalyzers.json` from the project root, or returns the defaults if there is none
    pub fn load_for_project(project_root: &Path) -> ProjectFileResult<Self> {
        let path = project_root.join(SETTINGS_FILE_NAME);
        if !path.is_file() {
            log::info!("No {} in {}, using default settings", SETTINGS_FILE_NAME, project_root.display());
            return Ok(Self::default());
        }

        let settings = Self::load(&path)?;
        log::info!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }
}
