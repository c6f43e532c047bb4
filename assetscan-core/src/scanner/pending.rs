//! The open match: start position, captured attributes, link and body.

use crate::event::Attributes;
use crate::group::Group;
use crate::span::Location;

/// A recognized tag that has not been closed yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingMatch {
    pub group: Group,
    pub attributes: Attributes,
    pub link: Option<String>,
    pub content: Option<String>,
    pub start: Location,
    /// Last known end, set provisionally when the opening tag ends.
    pub end: Option<Location>,
}

impl PendingMatch {
    pub fn new(group: Group, start: Location) -> Self {
        Self {
            group,
            attributes: Attributes::new(),
            link: None,
            content: None,
            start,
            end: None,
        }
    }

    /// Record an attribute; the link attribute is kept apart from the others.
    ///
    /// Names compare case-sensitively. Later values overwrite earlier ones
    /// without moving the key.
    pub fn capture_attribute(&mut self, link_attribute: Option<&str>, name: &str, value: &str) {
        if link_attribute == Some(name) {
            self.link = Some(value.to_owned());
        } else {
            self.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    /// Keep `content` as the body, replacing any earlier text.
    pub fn capture_text(&mut self, content: &str) {
        self.content = Some(content.to_owned());
    }

    /// Where an implicit close ends this match: its own last known end.
    pub fn last_end(&self) -> Location {
        self.end.unwrap_or(self.start)
    }
}
