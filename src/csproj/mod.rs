//! Project file customization
//!
//! Post-processes Unity generated `.csproj` files:
//! 1. References every Roslyn analyzer (`.dll`) and additional file (`.json`) of the analyzer folder
//! 2. Points `CodeAnalysisRuleSet` at the folder's `.ruleset`
//! 3. Forces `LangVersion` in configuration+platform scoped property groups

pub mod asset_classifier;
pub mod constants;
pub mod document;
pub mod generator;
pub mod lang_version;
pub mod path_resolver;
pub mod property_editor;
pub mod reference_injector;

// Re-export the main generator
pub use generator::{ProjectFileHook, ProjectFilesGenerator, find_project_files};
