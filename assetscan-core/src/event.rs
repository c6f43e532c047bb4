//! Asset events - the output of the scanner.
//!
//! One event is emitted per validated match, in document order, at the
//! moment the match closes. Comments are reported independently of tag
//! matching.
//!
//! ## Event Mapping
//!
//! ```text
//! <img src=a.png>                  ImageLink { link: "a.png" }
//! <link href=a.css>                Link { link: "a.css" }
//! <script src=a.js></script>       ScriptLink { link: "a.js" }
//! <script>f()</script>             ScriptContent { content: "f()" }
//! <style>p{}</style>               CssContent { content: "p{}" }
//! <wuic:html-import workflowId=w/> Import { workflow_id: "w" }
//! <!-- note -->                    Comment { content: " note " }
//! ```

use indexmap::IndexMap;

use crate::group::Group;
use crate::span::{Location, Span};

/// Attributes of a match other than its link attribute, in first-seen order.
pub type Attributes = IndexMap<String, String>;

/// Events produced for the asset handler.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AssetEvent {
    /// Image reference: `<img src=...>`
    ImageLink {
        link: String,
        attributes: Attributes,
        span: Span,
    },

    /// Linked resource, usually a stylesheet: `<link href=...>`
    Link {
        link: String,
        attributes: Attributes,
        span: Span,
    },

    /// External script: `<script src=...>`
    ScriptLink {
        link: String,
        attributes: Attributes,
        span: Span,
    },

    /// Inline script body (only when no `src` is present)
    ScriptContent {
        content: String,
        attributes: Attributes,
        span: Span,
    },

    /// Inline stylesheet body
    CssContent {
        content: String,
        attributes: Attributes,
        span: Span,
    },

    /// Import directive; the link value names a workflow
    Import {
        workflow_id: String,
        attributes: Attributes,
        span: Span,
    },

    /// Comment body.
    ///
    /// `length` is the full comment length (delimiters included) minus
    /// every line terminator inside the comment.
    Comment {
        content: String,
        start: Location,
        length: usize,
    },
}

impl AssetEvent {
    /// Get the span of a tag event. Comments have no end position.
    pub fn span(&self) -> Option<Span> {
        match self {
            AssetEvent::ImageLink { span, .. }
            | AssetEvent::Link { span, .. }
            | AssetEvent::ScriptLink { span, .. }
            | AssetEvent::ScriptContent { span, .. }
            | AssetEvent::CssContent { span, .. }
            | AssetEvent::Import { span, .. } => Some(*span),
            AssetEvent::Comment { .. } => None,
        }
    }

    /// Start position of the tag or comment.
    pub fn start(&self) -> Location {
        match self {
            AssetEvent::Comment { start, .. } => *start,
            _ => self.span().map(|s| s.start).unwrap_or_default(),
        }
    }

    /// The group a tag event came from.
    pub fn group(&self) -> Option<Group> {
        match self {
            AssetEvent::ImageLink { .. } => Some(Group::Image),
            AssetEvent::Link { .. } => Some(Group::LinkResource),
            AssetEvent::ScriptLink { .. } | AssetEvent::ScriptContent { .. } => {
                Some(Group::Script)
            }
            AssetEvent::CssContent { .. } => Some(Group::Style),
            AssetEvent::Import { .. } => Some(Group::Import),
            AssetEvent::Comment { .. } => None,
        }
    }

    /// Attributes captured with a tag event.
    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            AssetEvent::ImageLink { attributes, .. }
            | AssetEvent::Link { attributes, .. }
            | AssetEvent::ScriptLink { attributes, .. }
            | AssetEvent::ScriptContent { attributes, .. }
            | AssetEvent::CssContent { attributes, .. }
            | AssetEvent::Import { attributes, .. } => Some(attributes),
            AssetEvent::Comment { .. } => None,
        }
    }

    /// Check if this event references an external asset by URI.
    pub fn is_link(&self) -> bool {
        matches!(
            self,
            AssetEvent::ImageLink { .. } | AssetEvent::Link { .. } | AssetEvent::ScriptLink { .. }
        )
    }

    /// Check if this event carries inline asset content.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            AssetEvent::ScriptContent { .. } | AssetEvent::CssContent { .. }
        )
    }
}

/// Receiver of asset events.
///
/// Implemented for every `FnMut(AssetEvent)`, so a closure collecting into
/// a `Vec` is a complete handler.
pub trait AssetHandler {
    fn handle(&mut self, event: AssetEvent);
}

impl<F> AssetHandler for F
where
    F: FnMut(AssetEvent),
{
    #[inline]
    fn handle(&mut self, event: AssetEvent) {
        self(event)
    }
}
