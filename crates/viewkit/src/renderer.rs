//! File-based view renderer.
//!
//! This module provides [`Renderer`], which turns a template name and some data
//! into text, and optionally appends that text to a response body.
//!
//! # Rendering a View
//!
//! Every [`fetch`](Renderer::fetch) runs the same steps:
//!
//! 1. Reject call data carrying the reserved `template` key
//! 2. Probe every search path for the template, keeping the last match
//! 3. Fail with [`RenderError::TemplateNotFound`] when nothing matched
//! 4. Merge default attributes with the call data (call data wins)
//! 5. Hand the file and merged context to the [`TemplateEngine`]
//!
//! Nothing is cached between calls. Editing a template or adding a search path
//! takes effect on the next render.
//!
//! # Layered Roots
//!
//! Because the last match wins, later search paths override earlier ones. Put
//! shared defaults first and site-specific overrides after them:
//!
//! ```rust,ignore
//! let mut renderer = Renderer::new(["views/base", "views/site"], Attributes::new());
//! renderer.add_template_path("views/local/");
//! ```
//!
//! # Concurrency
//!
//! Rendering takes `&self` and the renderer is `Send + Sync`, so one renderer
//! can serve many threads behind an `Arc`. Changing paths or attributes needs
//! `&mut self`; share a mutable renderer through an `RwLock`.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::attributes::{self, Attributes, RenderContext};
use crate::config::RendererConfig;
use crate::engine::{MiniJinjaEngine, TemplateEngine};
use crate::error::RenderError;
use crate::paths::TemplatePaths;
use crate::sink::ResponseSink;

/// Renders named template files from an ordered list of search paths.
///
/// # Example
///
/// ```rust
/// use viewkit::{Attributes, Renderer};
/// use serde_json::json;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("hello.txt"), "{{ greeting }}, {{ name }}!").unwrap();
///
/// let mut renderer = Renderer::new(dir.path().to_str().unwrap(), Attributes::new());
/// renderer.add_attribute("greeting", "Hello");
///
/// let data = viewkit::attributes::from_value(json!({"name": "World"})).unwrap();
/// let mut body = String::new();
/// renderer.render(&mut body, "hello.txt", &data).unwrap();
/// assert_eq!(body, "Hello, World!");
/// ```
pub struct Renderer {
    engine: Box<dyn TemplateEngine>,
    paths: TemplatePaths,
    attributes: Attributes,
}

impl Renderer {
    /// Creates a renderer backed by [`MiniJinjaEngine`].
    ///
    /// `paths` may be a single directory or a sequence of them. Each one is
    /// normalized to end with `/`.
    pub fn new(paths: impl Into<TemplatePaths>, attributes: Attributes) -> Self {
        Self::with_engine(paths, attributes, MiniJinjaEngine::new())
    }

    /// Creates a renderer with a custom template engine.
    pub fn with_engine(
        paths: impl Into<TemplatePaths>,
        attributes: Attributes,
        engine: impl TemplateEngine + 'static,
    ) -> Self {
        Self {
            engine: Box::new(engine),
            paths: paths.into(),
            attributes,
        }
    }

    /// Creates a renderer from a loaded configuration.
    pub fn from_config(config: &RendererConfig) -> Self {
        Self::from_config_with_engine(config, MiniJinjaEngine::new())
    }

    /// Creates a renderer from a loaded configuration with a custom engine.
    pub fn from_config_with_engine(
        config: &RendererConfig,
        engine: impl TemplateEngine + 'static,
    ) -> Self {
        Self::with_engine(config.paths(), config.attributes.clone(), engine)
    }

    /// The engine templates are evaluated with.
    pub fn engine(&self) -> &dyn TemplateEngine {
        self.engine.as_ref()
    }

    // Attributes

    /// Returns the default attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Replaces all default attributes.
    pub fn set_attributes(&mut self, attributes: Attributes) {
        self.attributes = attributes;
    }

    /// Inserts or overwrites one default attribute.
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Returns the default attribute stored under `key`.
    ///
    /// An attribute explicitly set to `false` or `null` is still returned as
    /// `Some`; only a missing key yields `None`.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    // Search paths

    /// The first search path, for callers that only ever use one.
    ///
    /// `None` only when the list is empty, which the public constructors never
    /// produce.
    pub fn template_path(&self) -> Option<&str> {
        self.paths.first()
    }

    /// All search paths in resolution order.
    pub fn template_paths(&self) -> &[String] {
        self.paths.as_slice()
    }

    /// Appends a search path.
    ///
    /// Despite the name this never replaces existing paths: the new directory
    /// goes to the end of the list, where it overrides every earlier one. The
    /// path is stored as given, without separator normalization, and template
    /// names are appended to it directly: pass `"views/"`, not `"views"`.
    pub fn set_template_path(&mut self, path: impl Into<String>) {
        self.add_template_path(path);
    }

    /// Appends a search path. Same as [`set_template_path`](Self::set_template_path).
    pub fn add_template_path(&mut self, path: impl Into<String>) {
        self.paths.push(path);
    }

    // Rendering

    /// Locates `template` across the search paths without rendering it.
    pub fn resolve(&self, template: &str) -> Result<PathBuf, RenderError> {
        self.paths
            .resolve(template)
            .ok_or_else(|| RenderError::TemplateNotFound {
                name: template.to_string(),
            })
    }

    /// Returns true if some search path holds `template`.
    pub fn template_exists(&self, template: &str) -> bool {
        self.paths.resolve(template).is_some()
    }

    /// Renders `template` with `data` and returns the output.
    ///
    /// # Errors
    ///
    /// - [`RenderError::DuplicateTemplateKey`] if `data` (or the default
    ///   attributes) contains `template`. Checked before any filesystem access.
    /// - [`RenderError::TemplateNotFound`] if no search path holds the template.
    /// - Whatever the engine returns if evaluation fails.
    #[tracing::instrument(level = "debug", skip(self, data))]
    pub fn fetch(&self, template: &str, data: &Attributes) -> Result<String, RenderError> {
        attributes::ensure_unreserved(data)?;
        attributes::ensure_unreserved(&self.attributes)?;

        let path = self.resolve(template)?;
        let context = RenderContext::merge(&self.attributes, data);
        tracing::debug!(path = %path.display(), vars = context.len(), "rendering view");

        self.engine.evaluate(&path, &context)
    }

    /// Like [`fetch`](Self::fetch), taking any serializable value as data.
    ///
    /// The value must serialize to a mapping (or to `null`, meaning no data).
    pub fn fetch_with<T: Serialize>(&self, template: &str, data: &T) -> Result<String, RenderError> {
        let data = attributes::from_serialize(data)?;
        self.fetch(template, &data)
    }

    /// Renders `template` and appends the output to `sink`.
    ///
    /// Returns the sink so calls can be chained the way response builders are.
    /// On error nothing has been appended.
    pub fn render<S: ResponseSink>(
        &self,
        mut sink: S,
        template: &str,
        data: &Attributes,
    ) -> Result<S, RenderError> {
        let output = self.fetch(template, data)?;
        sink.append_body(&output)?;
        Ok(sink)
    }

    /// Like [`render`](Self::render), taking any serializable value as data.
    pub fn render_with<S: ResponseSink, T: Serialize>(
        &self,
        sink: S,
        template: &str,
        data: &T,
    ) -> Result<S, RenderError> {
        let data = attributes::from_serialize(data)?;
        self.render(sink, template, &data)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(TemplatePaths::default(), Attributes::new())
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("paths", &self.paths)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
