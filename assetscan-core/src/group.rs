//! Group registry: which tags reference assets, and where the reference lives.

use std::cmp::Ordering;

use crate::config::ScanConfig;

/// Asset group of a recognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Group {
    /// `<img src=...>`
    Image,
    /// `<link href=...>`
    LinkResource,
    /// `<script src=...>` or an inline script body
    Script,
    /// Inline `<style>` body
    Style,
    /// `<wuic:html-import workflowId=...>`
    Import,
}

/// Tag names sorted case-insensitively; `classify` binary-searches this.
static TAGS: [(&str, Group); 5] = [
    ("img", Group::Image),
    ("link", Group::LinkResource),
    ("script", Group::Script),
    ("style", Group::Style),
    ("wuic:html-import", Group::Import),
];

/// ASCII case-insensitive ordering, byte by byte.
fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// Classify a tag name, ignoring ASCII case.
///
/// Returns `None` for tags that carry no asset reference.
pub fn classify(tag_name: &str) -> Option<Group> {
    TAGS.binary_search_by(|(name, _)| cmp_ignore_case(name, tag_name))
        .ok()
        .map(|idx| TAGS[idx].1)
}

impl Group {
    /// The element name this group matches, in canonical lowercase.
    pub fn tag_name(self) -> &'static str {
        match self {
            Group::Image => "img",
            Group::LinkResource => "link",
            Group::Script => "script",
            Group::Style => "style",
            Group::Import => "wuic:html-import",
        }
    }

    /// Name of the attribute holding the asset reference.
    ///
    /// `Style` has none: its reference is the text content. The `Import`
    /// attribute comes from the configuration.
    pub fn link_attribute(self, config: &ScanConfig) -> Option<&str> {
        match self {
            Group::Image => Some("src"),
            Group::LinkResource => Some("href"),
            Group::Script => Some("src"),
            Group::Style => None,
            Group::Import => Some(config.import_attribute()),
        }
    }
}
