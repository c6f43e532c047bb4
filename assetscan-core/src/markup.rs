//! Markup callbacks - the interface between a tokenizer and the scanner.
//!
//! A tokenizer calls these in document order, once per document. Tag
//! structures arrive as start/end pairs; attributes arrive between the
//! start and end of their tag:
//!
//! ```text
//! <img src=a.png>      standalone_element_start("img", minimized=false)
//!                      attribute("src", "a.png")
//!                      standalone_element_end(minimized=false)   at '>'
//! <br/>                standalone_element_start("br", minimized=true)
//!                      standalone_element_end(minimized=true)    at '/'
//! <style>p{}</style>   open_element_start("style")
//!                      open_element_end                          at '>'
//!                      text("p{}")
//!                      close_element_start("style")
//!                      close_element_end                         at '>'
//! ```
//!
//! Element end positions point at the terminating `>` (or the `/` of a
//! minimized `/>`), except auto-close ends, which give the exact position
//! the implicitly closed element ends at.

use std::ops::Range;

use crate::span::Location;

/// Receiver of tokenizer callbacks.
///
/// Only the callbacks the asset scanner needs are required; the rest
/// default to no-ops.
pub trait MarkupHandler {
    fn document_start(&mut self) {}

    fn document_end(&mut self, _at: Location) {}

    fn open_element_start(&mut self, name: &str, at: Location);

    fn open_element_end(&mut self, at: Location);

    fn standalone_element_start(&mut self, name: &str, minimized: bool, at: Location);

    fn standalone_element_end(&mut self, minimized: bool, at: Location);

    fn close_element_start(&mut self, _name: &str, _at: Location) {}

    fn close_element_end(&mut self, at: Location);

    /// An open element is being closed implicitly (ancestor closed, or
    /// end of input).
    fn auto_close_element_start(&mut self, _name: &str, _at: Location) {}

    fn auto_close_element_end(&mut self, at: Location);

    fn unmatched_close_element_start(&mut self, _name: &str, _at: Location) {}

    /// A close tag with no open counterpart.
    fn unmatched_close_element_end(&mut self, at: Location);

    fn attribute(&mut self, name: &str, value: &str, name_at: Location, value_at: Location);

    /// Character data. `offset` is the byte offset of `content` in the document.
    fn text(&mut self, content: &str, offset: usize, at: Location);

    /// A comment. `content` excludes the `<!--`/`-->` delimiters; `outer` is
    /// the byte range of the whole comment including them.
    fn comment(&mut self, content: &str, content_offset: usize, outer: Range<usize>, at: Location);
}
