//! Declarative renderer configuration.
//!
//! A [`RendererConfig`] describes the search paths and default attributes of a
//! renderer, and can be loaded from YAML or JSON:
//!
//! ```yaml
//! template_paths:
//!   - views/base
//!   - views/site
//! attributes:
//!   site_name: Example
//!   year: 2024
//! ```
//!
//! `template_paths` also accepts a single string. Both keys are optional.

use std::path::Path;

use serde::Deserialize;

use crate::attributes::Attributes;
use crate::error::RenderError;
use crate::paths::TemplatePaths;

/// Search paths and default attributes for a [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RendererConfig {
    /// Template roots in resolution order.
    #[serde(default)]
    pub template_paths: PathList,

    /// Default attributes merged into every render.
    #[serde(default)]
    pub attributes: Attributes,
}

/// One path or a list of paths.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PathList {
    One(String),
    Many(Vec<String>),
}

impl Default for PathList {
    fn default() -> Self {
        PathList::Many(Vec::new())
    }
}

impl RendererConfig {
    /// Parses a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration file, choosing the format by extension.
    ///
    /// `.yaml` and `.yml` are parsed as YAML, `.json` as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RenderError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(RenderError::Config(format!(
                "unsupported configuration format: {}",
                path.display()
            ))),
        }
    }

    /// Normalized search paths. An empty list yields the default `"/"` root.
    pub fn paths(&self) -> TemplatePaths {
        match &self.template_paths {
            PathList::One(path) => TemplatePaths::from(path.as_str()),
            PathList::Many(paths) if paths.is_empty() => TemplatePaths::default(),
            PathList::Many(paths) => TemplatePaths::new(paths.iter().cloned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_yaml_list() {
        let config = RendererConfig::from_yaml(
            "template_paths:\n  - views/base\n  - views/site/\nattributes:\n  site: Example\n  year: 2024\n",
        )
        .unwrap();

        assert_eq!(
            config.paths().as_slice(),
            &["views/base/".to_string(), "views/site/".to_string()]
        );
        assert_eq!(config.attributes.get("site"), Some(&json!("Example")));
        assert_eq!(config.attributes.get("year"), Some(&json!(2024)));
    }

    #[test]
    fn test_from_yaml_single_path() {
        let config = RendererConfig::from_yaml("template_paths: templates\n").unwrap();
        assert_eq!(config.paths().as_slice(), &["templates/".to_string()]);
        assert!(config.attributes.is_empty());
    }

    #[test]
    fn test_empty_config_uses_default_root() {
        let config = RendererConfig::from_json("{}").unwrap();
        assert_eq!(config.paths(), TemplatePaths::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RendererConfig::from_json(r#"{"paths": ["a"]}"#).unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("view.json");
        std::fs::write(&json_path, r#"{"template_paths": ["a"], "attributes": {"k": true}}"#)
            .unwrap();
        let config = RendererConfig::from_file(&json_path).unwrap();
        assert_eq!(config.attributes.get("k"), Some(&json!(true)));

        let yml_path = dir.path().join("view.yml");
        std::fs::write(&yml_path, "template_paths: b\n").unwrap();
        let config = RendererConfig::from_file(&yml_path).unwrap();
        assert_eq!(config.paths().as_slice(), &["b/".to_string()]);
    }

    #[test]
    fn test_from_file_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.toml");
        std::fs::write(&path, "").unwrap();

        let err = RendererConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported configuration format"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = RendererConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
