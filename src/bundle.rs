//! Ordered path bundle with per-path attributes.
//!
//! A `PathBundle` is the unit of work that flows through the decorator and
//! formatter chain: an insertion-ordered set of path strings, each carrying
//! an ordered map of HTML attributes. Paths act as keys; re-adding a path
//! moves it to the end of the order while keeping its attributes.

use crate::error::{BundlerError, Result};

/// A single path entry plus its ordered attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathEntry {
    path: String,
    attributes: Vec<(String, String)>,
}

/// Ordered, deduplicated-by-key collection of asset paths.
///
/// Iteration yields path strings in insertion order of distinct keys. The
/// most recently (re-)inserted path sits at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBundle {
    entries: Vec<PathEntry>,
}

impl PathBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bundle from an initial ordered path list.
    pub fn from_paths<I, S>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bundle = Self::new();
        bundle.add_many(paths)?;
        Ok(bundle)
    }

    /// Add a path to the bundle.
    ///
    /// The path is trimmed first; an empty result is rejected without
    /// mutating the bundle. Re-adding an existing path moves it to the end
    /// of the iteration order and preserves its attributes.
    pub fn add(&mut self, path: &str) -> Result<()> {
        let path = path.trim();
        if path.is_empty() {
            return Err(BundlerError::input("path must be a non-empty string"));
        }
        match self.position(path) {
            Some(index) => {
                let entry = self.entries.remove(index);
                self.entries.push(entry);
            }
            None => self.entries.push(PathEntry {
                path: path.to_string(),
                attributes: Vec::new(),
            }),
        }
        Ok(())
    }

    /// Add each path in order, stopping at the first invalid one.
    pub fn add_many<I, S>(&mut self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.add(path.as_ref())?;
        }
        Ok(())
    }

    /// Set an attribute on a path, creating the entry if it is not present.
    ///
    /// Decorators may annotate a path before it is formally added; the
    /// lazily created entry behaves like any other.
    pub fn set_attribute(&mut self, path: &str, key: &str, value: &str) {
        let index = match self.position(path) {
            Some(index) => index,
            None => {
                self.entries.push(PathEntry {
                    path: path.to_string(),
                    attributes: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        let attributes = &mut self.entries[index].attributes;
        match attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => attributes.push((key.to_string(), value.to_string())),
        }
    }

    /// Attributes for a path, in the order they were set. Empty for an
    /// unknown path.
    pub fn attributes(&self, path: &str) -> &[(String, String)] {
        match self.position(path) {
            Some(index) => &self.entries[index].attributes,
            None => &[],
        }
    }

    /// Remove a single path and its attributes. Returns whether it existed.
    pub fn remove(&mut self, path: &str) -> bool {
        match self.position(path) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove all entries, attributes included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    /// First path in iteration order, if any.
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|e| e.path.as_str())
    }

    /// Number of distinct paths in the bundle.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate path strings in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.path == path)
    }
}

impl<'a> IntoIterator for &'a PathBundle {
    type Item = &'a str;
    type IntoIter = std::vec::IntoIter<&'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths().collect::<Vec<_>>().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paths_of(bundle: &PathBundle) -> Vec<&str> {
        bundle.paths().collect()
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let bundle = PathBundle::from_paths(["a.css", "b.css", "c.css"]).unwrap();
        assert_eq!(paths_of(&bundle), vec!["a.css", "b.css", "c.css"]);
        assert_eq!(bundle.count(), 3);
    }

    #[test]
    fn test_re_add_moves_to_end() {
        let mut bundle = PathBundle::from_paths(["a.css", "b.css", "c.css"]).unwrap();
        bundle.add("a.css").unwrap();
        assert_eq!(paths_of(&bundle), vec!["b.css", "c.css", "a.css"]);
        assert_eq!(bundle.count(), 3);
    }

    #[test]
    fn test_re_add_keeps_attributes() {
        let mut bundle = PathBundle::new();
        bundle.add("a.css").unwrap();
        bundle.set_attribute("a.css", "media", "print");
        bundle.add("a.css").unwrap();
        assert_eq!(
            bundle.attributes("a.css"),
            &[("media".to_string(), "print".to_string())]
        );
    }

    #[test]
    fn test_add_trims_whitespace() {
        let mut bundle = PathBundle::new();
        bundle.add("  a.css  ").unwrap();
        assert_eq!(paths_of(&bundle), vec!["a.css"]);
    }

    #[test]
    fn test_add_empty_fails_without_mutation() {
        let mut bundle = PathBundle::from_paths(["a.css"]).unwrap();
        assert!(matches!(
            bundle.add(""),
            Err(BundlerError::InvalidInput { .. })
        ));
        assert!(matches!(
            bundle.add("   "),
            Err(BundlerError::InvalidInput { .. })
        ));
        assert_eq!(bundle.count(), 1);
    }

    #[test]
    fn test_set_attribute_creates_entry() {
        let mut bundle = PathBundle::new();
        bundle.set_attribute("lazy.js", "defer", "defer");
        assert!(bundle.contains("lazy.js"));
        assert_eq!(bundle.count(), 1);
    }

    #[test]
    fn test_set_attribute_overwrites_in_place() {
        let mut bundle = PathBundle::new();
        bundle.add("a.js").unwrap();
        bundle.set_attribute("a.js", "integrity", "one");
        bundle.set_attribute("a.js", "crossorigin", "anonymous");
        bundle.set_attribute("a.js", "integrity", "two");
        assert_eq!(
            bundle.attributes("a.js"),
            &[
                ("integrity".to_string(), "two".to_string()),
                ("crossorigin".to_string(), "anonymous".to_string()),
            ]
        );
    }

    #[test]
    fn test_attributes_unknown_path_is_empty() {
        let bundle = PathBundle::new();
        assert!(bundle.attributes("nope.css").is_empty());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut bundle = PathBundle::from_paths(["a.css", "b.css"]).unwrap();
        bundle.set_attribute("a.css", "media", "print");
        bundle.clear();
        assert!(bundle.is_empty());
        assert!(bundle.attributes("a.css").is_empty());
    }

    #[test]
    fn test_remove_named_path() {
        let mut bundle = PathBundle::from_paths(["a.css", "b.css"]).unwrap();
        assert!(bundle.remove("a.css"));
        assert!(!bundle.remove("a.css"));
        assert_eq!(paths_of(&bundle), vec!["b.css"]);
    }

    #[test]
    fn test_duplicates_collapse_to_last_position() {
        let bundle = PathBundle::from_paths(["a", "b", "a", "c", "b"]).unwrap();
        assert_eq!(paths_of(&bundle), vec!["a", "c", "b"]);
    }
}
