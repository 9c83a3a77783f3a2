//! Error types for view rendering.
//!
//! This module provides [`RenderError`], the single error type returned by every
//! fallible operation in the crate. Callers distinguish three families:
//!
//! - invalid input: the call data carries the reserved `template` key
//! - not found: no search path holds the requested template
//! - evaluation: the template engine failed while producing output
//!
//! Engine errors are surfaced exactly as the engine returned them. The renderer
//! never rewraps or suppresses them.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The call data contains the reserved `template` key.
    #[error("duplicate template key found")]
    DuplicateTemplateKey,

    /// None of the search paths contains the requested template.
    #[error("view cannot render `{name}` because the template does not exist")]
    TemplateNotFound {
        /// The template name that was requested
        name: String,
    },

    /// The template engine failed while evaluating a template.
    #[error("template error: {0}")]
    Evaluation(String),

    /// The template engine could not read a resolved template file.
    #[error("failed to read template \"{}\": {source}", path.display())]
    Read {
        /// Path of the resolved template
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error while writing into a response sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Renderer configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RenderError {
    /// Returns true for errors caused by invalid caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RenderError::DuplicateTemplateKey)
    }

    /// Returns true when the requested template could not be located.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::TemplateNotFound { .. })
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        RenderError::Evaluation(err.to_string())
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        RenderError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Config(err.to_string())
    }
}
