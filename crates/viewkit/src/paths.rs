//! Ordered template search paths.
//!
//! [`TemplatePaths`] holds the directories a renderer probes for template files.
//! Paths given at construction are normalized to end with a `/`; the
//! normalization is idempotent, so `"views"` and `"views/"` both become
//! `"views/"`.
//!
//! # Resolution
//!
//! [`TemplatePaths::resolve`] checks every directory in registration order and
//! keeps the *last* one that contains the template. A directory added later
//! therefore overrides one added earlier:
//!
//! ```text
//! paths:   ["themes/base/", "themes/custom/"]
//! present: themes/base/page.html, themes/custom/page.html
//! result:  themes/custom/page.html
//! ```
//!
//! The scan never stops early, even after a hit.
//!
//! A candidate is the directory string followed directly by the template name.
//! Paths appended after construction are not normalized, so a root pushed as
//! `"views/pre_"` finds `"views/pre_page.html"` for the name `"page.html"`.

use std::fs::File;
use std::path::{Path, PathBuf};

/// Separator appended to search paths that lack one.
pub const SEPARATOR: char = '/';

/// Ordered list of template root directories.
///
/// Insertion order is significant. Entries are never reordered or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    paths: Vec<String>,
}

impl TemplatePaths {
    /// Builds a normalized path list from any sequence of directories.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(|p| normalize(p.into())).collect(),
        }
    }

    /// Appends a directory to the end of the list, stored exactly as given.
    pub fn push(&mut self, path: impl Into<String>) {
        self.paths.push(path.into());
    }

    /// First registered directory, if any.
    pub fn first(&self) -> Option<&str> {
        self.paths.first().map(String::as_str)
    }

    /// All directories in registration order.
    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    /// Iterates the directories in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Number of registered directories.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true when no directory is registered.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Finds the file for `template`, last matching directory wins.
    ///
    /// Only readable regular files count: a directory with the template's
    /// name, or a file that cannot be opened, is skipped and does not shadow
    /// an earlier match. Returns `None` when no directory holds the template.
    pub fn resolve(&self, template: &str) -> Option<PathBuf> {
        let mut found: Option<PathBuf> = None;

        for dir in &self.paths {
            let candidate = join(dir, template);
            if !is_readable_file(&candidate) {
                tracing::trace!(path = %candidate.display(), "template probe missed");
                continue;
            }

            if let Some(previous) = &found {
                tracing::debug!(
                    template,
                    shadowed = %previous.display(),
                    winner = %candidate.display(),
                    "later search path overrides earlier match"
                );
            } else {
                tracing::debug!(path = %candidate.display(), "template probe hit");
            }
            found = Some(candidate);
        }

        found
    }
}

impl Default for TemplatePaths {
    /// The list a renderer gets when no path is supplied: the empty string,
    /// normalized to `"/"`.
    fn default() -> Self {
        Self::from("")
    }
}

impl From<&str> for TemplatePaths {
    fn from(path: &str) -> Self {
        Self::new([path])
    }
}

impl From<String> for TemplatePaths {
    fn from(path: String) -> Self {
        Self::new([path])
    }
}

impl From<&String> for TemplatePaths {
    fn from(path: &String) -> Self {
        Self::new([path.as_str()])
    }
}

impl From<Vec<String>> for TemplatePaths {
    fn from(paths: Vec<String>) -> Self {
        Self::new(paths)
    }
}

impl From<Vec<&str>> for TemplatePaths {
    fn from(paths: Vec<&str>) -> Self {
        Self::new(paths)
    }
}

impl From<&[&str]> for TemplatePaths {
    fn from(paths: &[&str]) -> Self {
        Self::new(paths.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for TemplatePaths {
    fn from(paths: [&str; N]) -> Self {
        Self::new(paths)
    }
}

impl<'a> IntoIterator for &'a TemplatePaths {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Appends [`SEPARATOR`] unless the path already ends with a separator.
pub fn normalize(mut path: String) -> String {
    if !ends_with_separator(&path) {
        path.push(SEPARATOR);
    }
    path
}

fn ends_with_separator(path: &str) -> bool {
    path.ends_with(SEPARATOR) || path.ends_with(std::path::MAIN_SEPARATOR)
}

/// Concatenates a search directory and a template name.
///
/// Plain string concatenation, never `Path::join`: no separator is inserted,
/// and an absolute template name stays underneath the directory.
pub(crate) fn join(dir: &str, template: &str) -> PathBuf {
    let mut joined = String::with_capacity(dir.len() + template.len());
    joined.push_str(dir);
    joined.push_str(template);
    PathBuf::from(joined)
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn dir_str(dir: &TempDir) -> String {
        dir.path().to_string_lossy().into_owned()
    }

    #[test]
    fn test_single_string_is_normalized() {
        let paths = TemplatePaths::from("templates");
        assert_eq!(paths.as_slice(), &["templates/".to_string()]);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let paths = TemplatePaths::from("templates/");
        assert_eq!(paths.as_slice(), &["templates/".to_string()]);
    }

    #[test]
    fn test_default_is_root() {
        assert_eq!(TemplatePaths::default().as_slice(), &["/".to_string()]);
    }

    #[test]
    fn test_sequence_keeps_order() {
        let paths = TemplatePaths::from(vec!["/b", "/a/", "/c"]);
        assert_eq!(
            paths.as_slice(),
            &["/b/".to_string(), "/a/".to_string(), "/c/".to_string()]
        );
    }

    #[test]
    fn test_push_appends_verbatim() {
        let mut paths = TemplatePaths::from(["/a", "/b"]);
        paths.push("/c");
        assert_eq!(
            paths.as_slice(),
            &["/a/".to_string(), "/b/".to_string(), "/c".to_string()]
        );
        assert_eq!(paths.first(), Some("/a/"));
    }

    #[test]
    fn test_join_is_plain_concatenation() {
        assert_eq!(join("/c", "t.html"), PathBuf::from("/ct.html"));
        assert_eq!(join("/c/", "t.html"), PathBuf::from("/c/t.html"));
        assert_eq!(join("/c/", "/etc/t"), PathBuf::from("/c//etc/t"));
    }

    #[test]
    fn test_resolve_last_match_wins() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        fs::write(a.path().join("t.tpl"), "from a").unwrap();
        fs::write(b.path().join("t.tpl"), "from b").unwrap();

        let paths = TemplatePaths::new([dir_str(&a), dir_str(&b)]);
        assert_eq!(paths.resolve("t.tpl"), Some(b.path().join("t.tpl")));
    }

    #[test]
    fn test_resolve_keeps_match_from_earlier_dir() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        fs::write(a.path().join("only_a.tpl"), "a").unwrap();

        let paths = TemplatePaths::new([dir_str(&a), dir_str(&b)]);
        assert_eq!(paths.resolve("only_a.tpl"), Some(a.path().join("only_a.tpl")));
    }

    #[test]
    fn test_resolve_nested_name() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("users")).unwrap();
        fs::write(root.path().join("users/list.html"), "").unwrap();

        let paths = TemplatePaths::from(dir_str(&root));
        assert_eq!(
            paths.resolve("users/list.html"),
            Some(root.path().join("users/list.html"))
        );
    }

    #[test]
    fn test_resolve_skips_directories() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("partials")).unwrap();

        let paths = TemplatePaths::from(dir_str(&root));
        assert_eq!(paths.resolve("partials"), None);
    }

    #[test]
    fn test_resolve_missing() {
        let root = TempDir::new().unwrap();
        let paths = TemplatePaths::from(dir_str(&root));
        assert_eq!(paths.resolve("nope.html"), None);
    }

    #[test]
    fn test_resolve_unsuffixed_pushed_path_concatenates() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        fs::write(b.path().join("pre_t.tpl"), "").unwrap();
        fs::write(b.path().join("t.tpl"), "").unwrap();

        let mut paths = TemplatePaths::from(dir_str(&a));
        paths.push(format!("{}/pre_", dir_str(&b)));
        assert_eq!(paths.resolve("t.tpl"), Some(b.path().join("pre_t.tpl")));

        let mut paths = TemplatePaths::from(dir_str(&a));
        paths.push(dir_str(&b));
        assert_eq!(paths.resolve("t.tpl"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_skips_unreadable_file() {
        use std::os::unix::fs::PermissionsExt;

        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        fs::write(a.path().join("t.tpl"), "a").unwrap();
        let locked = b.path().join("t.tpl");
        fs::write(&locked, "b").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still open the file.
        if File::open(&locked).is_ok() {
            return;
        }

        let paths = TemplatePaths::new([dir_str(&a), dir_str(&b)]);
        assert_eq!(paths.resolve("t.tpl"), Some(a.path().join("t.tpl")));
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(path in "[a-z/]{0,12}") {
            let once = normalize(path);
            prop_assert!(once.ends_with('/'));
            prop_assert_eq!(normalize(once.clone()), once);
        }
    }
}
