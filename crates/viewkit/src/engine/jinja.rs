//! MiniJinja-backed template engine.

use std::path::{Path, PathBuf};

use minijinja::{Environment, Value};

use super::{read_source, TemplateEngine};
use crate::attributes::RenderContext;
use crate::error::RenderError;

/// MiniJinja-based template engine.
///
/// This is the default engine, providing Jinja2-compatible syntax: loops,
/// conditionals, filters and macros. Every context entry is available as a
/// top-level variable.
///
/// Templates are compiled from the resolved file on every call. Auto-escaping
/// follows MiniJinja's defaults, keyed on the file name, so `.html` views are
/// HTML-escaped and `.txt` views are not.
///
/// # Example
///
/// ```rust
/// use viewkit::{MiniJinjaEngine, RenderContext, TemplateEngine};
/// use serde_json::json;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("hello.txt");
/// std::fs::write(&path, "Hello, {{ name }}!").unwrap();
///
/// let data = viewkit::attributes::from_value(json!({"name": "World"})).unwrap();
/// let ctx = RenderContext::merge(&Default::default(), &data);
///
/// let output = MiniJinjaEngine::new().evaluate(&path, &ctx).unwrap();
/// assert_eq!(output, "Hello, World!");
/// ```
///
/// # Includes
///
/// `{% include %}` and `{% extends %}` need a loader. Use
/// [`with_loader`](Self::with_loader) to load referenced templates from a
/// directory:
///
/// ```rust,ignore
/// let engine = MiniJinjaEngine::new().with_loader("./views");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
    loader_dir: Option<PathBuf>,
}

impl MiniJinjaEngine {
    /// Creates a new engine with a stock MiniJinja environment.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            loader_dir: None,
        }
    }

    /// Resolves `{% include %}` and `{% extends %}` targets from `dir`.
    pub fn with_loader(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.env.set_loader(minijinja::path_loader(dir.clone()));
        self.loader_dir = Some(dir);
        self
    }

    /// Directory used for includes, if one was configured.
    pub fn loader_dir(&self) -> Option<&Path> {
        self.loader_dir.as_deref()
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// This allows registering custom filters, functions or globals.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn evaluate(&self, path: &Path, context: &RenderContext) -> Result<String, RenderError> {
        let source = read_source(path)?;
        let name = path.to_string_lossy();
        let ctx = Value::from_serialize(context);

        let output = self.env.render_named_str(&name, &source, ctx)?;
        tracing::debug!(path = %path.display(), bytes = output.len(), "evaluated template");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn context(value: serde_json::Value) -> RenderContext {
        let data = crate::attributes::from_value(value).unwrap();
        RenderContext::merge(&Default::default(), &data)
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_evaluate_simple() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "greet.txt", "Hello, {{ name }}!");

        let output = MiniJinjaEngine::new()
            .evaluate(&path, &context(json!({"name": "World"})))
            .unwrap();
        assert_eq!(output, "Hello, World!");
    }

    #[test]
    fn test_evaluate_loop() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "list.txt",
            "{% for item in items %}{{ item }},{% endfor %}",
        );

        let output = MiniJinjaEngine::new()
            .evaluate(&path, &context(json!({"items": ["a", "b", "c"]})))
            .unwrap();
        assert_eq!(output, "a,b,c,");
    }

    #[test]
    fn test_html_is_escaped() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "page.html", "<p>{{ body }}</p>");

        let output = MiniJinjaEngine::new()
            .evaluate(&path, &context(json!({"body": "<b> & co"})))
            .unwrap();
        assert_eq!(output, "<p>&lt;b&gt; &amp; co</p>");
    }

    #[test]
    fn test_syntax_error_is_evaluation_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.txt", "{{ unclosed");

        let err = MiniJinjaEngine::new()
            .evaluate(&path, &RenderContext::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Evaluation(_)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = MiniJinjaEngine::new()
            .evaluate(&dir.path().join("gone.txt"), &RenderContext::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Read { .. }));
    }

    #[test]
    fn test_include_through_loader() {
        let dir = TempDir::new().unwrap();
        write(&dir, "header.txt", "[{{ title }}]");
        let path = write(&dir, "page.txt", "{% include 'header.txt' %} body");

        let engine = MiniJinjaEngine::new().with_loader(dir.path());
        assert_eq!(engine.loader_dir(), Some(dir.path()));

        let output = engine
            .evaluate(&path, &context(json!({"title": "Home"})))
            .unwrap();
        assert_eq!(output, "[Home] body");
    }

    #[test]
    fn test_custom_filter() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "shout.txt", "{{ word | shout }}");

        let mut engine = MiniJinjaEngine::new();
        engine
            .environment_mut()
            .add_filter("shout", |value: String| value.to_uppercase());

        let output = engine
            .evaluate(&path, &context(json!({"word": "hey"})))
            .unwrap();
        assert_eq!(output, "HEY");
    }
}
