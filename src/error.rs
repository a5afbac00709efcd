//! Error types for project file generation
//!
//! A missing analyzer directory is not an error (it is reported through the log
//! and the pass continues), so everything here aborts the pass for one project file.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for project file operations
#[derive(Error, Debug)]
pub enum ProjectFileError {
    /// IO errors (reading or writing project files, directory access, etc.)
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file could not be parsed
    #[error("Settings error in {file:?}: {message}")]
    Settings {
        file: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Project text is not well-formed XML
    #[error("XML parsing error: {message}")]
    XmlParsing { message: String },

    /// Project text contains no root element
    #[error("Project file has no root element")]
    MissingRoot,

    /// Serialized output or input bytes were not valid UTF-8
    #[error("Encoding error: {message}")]
    Encoding { message: String },
}

/// Result type alias for project file operations
pub type ProjectFileResult<T> = Result<T, ProjectFileError>;

impl From<std::io::Error> for ProjectFileError {
    fn from(err: std::io::Error) -> Self {
        ProjectFileError::Io {
            source: err,
            message: "IO operation failed".to_string(),
        }
    }
}

impl From<quick_xml::Error> for ProjectFileError {
    fn from(err: quick_xml::Error) -> Self {
        ProjectFileError::XmlParsing {
            message: err.to_string(),
        }
    }
}

/// Helper trait for converting IO errors with context
pub trait IoContext<T> {
    fn with_io_context(self, message: &str) -> ProjectFileResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_io_context(self, message: &str) -> ProjectFileResult<T> {
        self.map_err(|e| ProjectFileError::Io {
            message: message.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_context_keeps_message() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = result.with_io_context("Failed to read Assembly-CSharp.csproj").unwrap_err();
        assert_eq!(err.to_string(), "IO error: Failed to read Assembly-CSharp.csproj");
    }
}
