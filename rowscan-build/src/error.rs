use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while locating or parsing source files.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The file or directory could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid Rust syntax. No descriptors are returned for it.
    #[error("failed to parse {}:{line}:{column}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: syn::Error,
    },
}

impl ScanError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, source: syn::Error) -> Self {
        let (line, column) = span_position(&source);
        Self::Parse {
            path: path.to_path_buf(),
            line,
            column,
            source,
        }
    }
}

/// Errors raised while rendering or validating generated code.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No template with this logical name is registered.
    #[error("template '{name}' not found")]
    TemplateNotFound { name: String },

    /// A template failed to compile when it was added to the registry.
    #[error("invalid template '{name}': {source}")]
    InvalidTemplate {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Template execution failed, e.g. a helper received an incompatible argument.
    #[error("failed to render template '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// The rendered output is not valid Rust syntax.
    #[error("generated code does not parse at {line}:{column}: {source}")]
    Syntax {
        line: usize,
        column: usize,
        #[source]
        source: syn::Error,
    },

    /// Writing to the output sink failed.
    #[error("failed to write generated code: {0}")]
    Io(#[from] std::io::Error),
}

/// 1-based line and column of the start of a syn error.
pub(crate) fn span_position(err: &syn::Error) -> (usize, usize) {
    let start = err.span().start();
    (start.line, start.column + 1)
}
