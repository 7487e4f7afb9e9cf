//! Bundle rendering: tag formatters and the decorator chain.
//!
//! A [`Formatter`] turns a [`PathBundle`] into final HTML markup. Decorators
//! implement the same trait but transform the bundle first and delegate the
//! actual tag rendering to an inner formatter, so a bundle always ends at a
//! concrete tag formatter no matter how deep the chain is.

pub mod concatenate;
pub mod sri;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bundle::PathBundle;
use crate::error::{BundlerError, Result};

pub use concatenate::Concatenate;
pub use sri::{Sri, SriAlgorithm};

/// Renders a bundle to markup, possibly transforming it first.
///
/// Decorators mutate the bundle in place before delegating inward; the
/// caller keeps ownership and can inspect the final path set afterwards.
pub trait Formatter {
    fn render(&self, bundle: &mut PathBundle) -> Result<String>;
}

/// A formatter wrapper that adjusts the bundle before delegating inward.
///
/// Concrete decorators implement [`Decorator::modify_paths`] only; rendering
/// is fixed as "modify, then delegate to the inner formatter" by the
/// provided [`Decorator::render`], which their [`Formatter`] impls forward
/// to.
pub trait Decorator {
    fn inner(&self) -> &dyn Formatter;

    /// Adjust the bundle: add or replace paths, set attributes, write
    /// derived artifacts.
    fn modify_paths(&self, bundle: &mut PathBundle) -> Result<()>;

    fn render(&self, bundle: &mut PathBundle) -> Result<String> {
        self.modify_paths(bundle)?;
        self.inner().render(bundle)
    }
}

/// The asset kind a terminal tag formatter emits markup for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Stylesheet,
    Script,
    #[serde(rename = "script.module")]
    ScriptModule,
}

impl FromStr for TagKind {
    type Err = BundlerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stylesheet" => Ok(Self::Stylesheet),
            "script" => Ok(Self::Script),
            "script.module" => Ok(Self::ScriptModule),
            other => Err(BundlerError::InvalidConfig {
                message: format!("Unknown formatter type '{other}'"),
                help: Some("Expected 'stylesheet', 'script' or 'script.module'".to_string()),
            }),
        }
    }
}

/// Terminal formatter producing one HTML tag per path.
#[derive(Debug, Clone, Copy)]
pub struct TagFormatter {
    kind: TagKind,
}

impl TagFormatter {
    pub fn new(kind: TagKind) -> Self {
        Self { kind }
    }

    fn render_tag(&self, bundle: &PathBundle, path: &str) -> String {
        let mut tag = match self.kind {
            TagKind::Stylesheet => {
                format!("<link rel=\"stylesheet\" href=\"{}\"", escape(path))
            }
            TagKind::Script => format!("<script src=\"{}\"", escape(path)),
            TagKind::ScriptModule => {
                format!("<script type=\"module\" src=\"{}\"", escape(path))
            }
        };
        for (key, value) in bundle.attributes(path) {
            tag.push(' ');
            tag.push_str(key);
            tag.push_str("=\"");
            tag.push_str(&escape(value));
            tag.push('"');
        }
        tag.push('>');
        if matches!(self.kind, TagKind::Script | TagKind::ScriptModule) {
            tag.push_str("</script>");
        }
        tag
    }
}

impl Formatter for TagFormatter {
    fn render(&self, bundle: &mut PathBundle) -> Result<String> {
        let tags: Vec<String> = bundle
            .paths()
            .map(|path| self.render_tag(bundle, path))
            .collect();
        Ok(tags.join("\n"))
    }
}

/// Escape the HTML-significant characters in an attribute value or path.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Resolve a bundle path against a source root.
///
/// Absolute bundle paths are taken as-is; web-style paths with a leading
/// slash resolve relative to the root when the root exists (so a `web_path`
/// produced by an earlier decorator can be checked against a webroot).
pub fn resolve_source(root: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() && candidate.exists() {
        return candidate.to_path_buf();
    }
    root.join(path.trim_start_matches('/'))
}
