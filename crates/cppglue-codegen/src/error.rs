//! Error types for artifact generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Fatal conditions raised while rendering or writing artifacts.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A template file could not be read.
    #[error("template '{name}' could not be read from {}: {source}", path.display())]
    TemplateUnreadable {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A placeholder survived substitution.
    #[error("template '{template}' has unresolved placeholder {placeholder}")]
    UnresolvedPlaceholder {
        template: String,
        placeholder: String,
    },

    /// The build descriptor has no `project(...)` line to annotate.
    #[error("template '{0}' has no project() declaration")]
    MissingProjectDeclaration(String),

    /// Parent directories of an artifact could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two artifacts target the same path.
    #[error("artifact path {} is produced twice", .0.display())]
    DuplicateArtifact(PathBuf),
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn CodegenError___unresolved_placeholder___displays_template_and_token() {
        let err = CodegenError::UnresolvedPlaceholder {
            template: "setup.py".to_string(),
            placeholder: "{{author}}".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "template 'setup.py' has unresolved placeholder {{author}}"
        );
    }

    #[test]
    fn CodegenError___write___displays_path() {
        let err = CodegenError::Write {
            path: PathBuf::from("/out/shapes.cpp"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        let msg = err.to_string();
        assert!(msg.contains("/out/shapes.cpp"));
        assert!(msg.contains("denied"));
    }
}
