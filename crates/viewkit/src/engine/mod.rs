//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait, the seam between the
//! [`Renderer`](crate::Renderer) and whatever actually executes a template file.
//! The renderer locates the file and builds the [`RenderContext`]; the engine
//! reads the file, evaluates it against the context and returns the produced
//! text.
//!
//! Two engines ship with the crate:
//!
//! | Engine | Syntax | Use When |
//! |--------|--------|----------|
//! | [`MiniJinjaEngine`] | Jinja2 (`{{ name }}`, `{% for %}`) | Default, full template logic |
//! | [`SimpleEngine`] | `{name}`, `{user.name}` | Plain substitution, no logic |
//!
//! Any `Fn(&Path, &RenderContext) -> Result<String, RenderError>` closure is
//! also an engine, which is handy for tests and for adapting other crates:
//!
//! ```rust
//! use std::path::Path;
//! use viewkit::{RenderContext, RenderError, TemplateEngine};
//!
//! let engine = |path: &Path, ctx: &RenderContext| -> Result<String, RenderError> {
//!     Ok(format!("{} with {} vars", path.display(), ctx.len()))
//! };
//! let out = engine.evaluate(Path::new("page.html"), &RenderContext::default()).unwrap();
//! assert_eq!(out, "page.html with 0 vars");
//! ```
//!
//! # Output
//!
//! Engines return their output as a `String`. Nothing is written to a shared
//! buffer, so a failing evaluation leaves no partial output behind.

mod jinja;
mod simple;

use std::path::Path;

pub use jinja::MiniJinjaEngine;
pub use simple::SimpleEngine;

use crate::attributes::RenderContext;
use crate::error::RenderError;

/// Executes a template file against a context.
///
/// Implementations must not cache anything that outlives one call in a way
/// that changes results: every render re-reads the resolved file.
pub trait TemplateEngine: Send + Sync {
    /// Evaluates the template at `path` with every context entry in scope by name.
    ///
    /// Errors are returned to the caller of [`Renderer::fetch`](crate::Renderer::fetch)
    /// unchanged.
    fn evaluate(&self, path: &Path, context: &RenderContext) -> Result<String, RenderError>;
}

impl<F> TemplateEngine for F
where
    F: Fn(&Path, &RenderContext) -> Result<String, RenderError> + Send + Sync,
{
    fn evaluate(&self, path: &Path, context: &RenderContext) -> Result<String, RenderError> {
        self(path, context)
    }
}

/// Reads a resolved template file.
pub(crate) fn read_source(path: &Path) -> Result<String, RenderError> {
    std::fs::read_to_string(path).map_err(|source| RenderError::Read {
        path: path.to_path_buf(),
        source,
    })
}
