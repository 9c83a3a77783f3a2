//! # Viewkit - File-Based View Rendering
//!
//! `viewkit` renders named template files into text and appends the result to
//! HTTP response bodies. It is the view layer only: it finds the file, builds
//! the variables the template sees, and delegates evaluation to a pluggable
//! template engine.
//!
//! ## Core Concepts
//!
//! - [`Renderer`]: Owns the search paths and default attributes, renders views
//! - [`TemplatePaths`]: Ordered template roots, last match wins
//! - [`Attributes`] / [`RenderContext`]: Defaults, and the per-call merge of defaults and data
//! - [`TemplateEngine`]: Evaluates a template file against a context
//! - [`ResponseSink`]: A body the rendered output is appended to
//! - [`RendererConfig`]: Search paths and attributes loaded from YAML or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use viewkit::{Attributes, Renderer};
//! use serde_json::json;
//!
//! let views = tempfile::tempdir().unwrap();
//! std::fs::write(views.path().join("profile.txt"), "{{ site }}: {{ user }}").unwrap();
//!
//! let mut renderer = Renderer::new(views.path().to_str().unwrap(), Attributes::new());
//! renderer.add_attribute("site", "Example");
//!
//! let data = viewkit::attributes::from_value(json!({"user": "ana"})).unwrap();
//! assert_eq!(renderer.fetch("profile.txt", &data).unwrap(), "Example: ana");
//! ```
//!
//! ## Layered Template Roots
//!
//! Search paths are probed in order and the *last* directory holding the
//! template wins, so a path registered later overrides the ones before it.
//! Paths added after construction are used as given, so end them with `/`:
//!
//! ```rust
//! use viewkit::{Attributes, Renderer};
//!
//! let base = tempfile::tempdir().unwrap();
//! let theme = tempfile::tempdir().unwrap();
//! std::fs::write(base.path().join("footer.txt"), "base footer").unwrap();
//! std::fs::write(theme.path().join("footer.txt"), "theme footer").unwrap();
//!
//! let mut renderer = Renderer::new(base.path().to_str().unwrap(), Attributes::new());
//! renderer.add_template_path(format!("{}/", theme.path().display()));
//!
//! assert_eq!(renderer.fetch("footer.txt", &Attributes::new()).unwrap(), "theme footer");
//! ```
//!
//! ## Errors
//!
//! All operations return [`RenderError`]. Call data may not contain the key
//! `template`; a missing template is [`RenderError::TemplateNotFound`]; engine
//! failures come back exactly as the engine reported them.

pub mod attributes;
pub mod config;
pub mod engine;
mod error;
pub mod paths;
pub mod prelude;
mod renderer;
pub mod sink;

pub use attributes::{Attributes, RenderContext, RESERVED_KEY};
pub use config::RendererConfig;
pub use engine::{MiniJinjaEngine, SimpleEngine, TemplateEngine};
pub use error::RenderError;
pub use paths::TemplatePaths;
pub use renderer::Renderer;
pub use sink::{ResponseSink, WriteSink};
