//! The asset scanner: a single-pass state machine over markup callbacks.
//!
//! At most one match is live at a time. A match opens on a recognized tag
//! start and closes on whichever comes first:
//!
//! - its explicit close tag (`</style>`), ending after the `>`
//! - the end of a standalone tag (`<img ...>` or `<link .../>`)
//! - an auto-close notification from the tokenizer, ending exactly there
//! - the start of any following tag, ending where its own opening tag
//!   ended (the earlier match keeps its span even though the tokenizer has
//!   already moved on)
//!
//! On close the match is validated and becomes exactly one [`AssetEvent`],
//! or is dropped with an informational log line.

mod comment;
mod dispatch;
mod pending;

use std::mem;
use std::ops::Range;

use crate::config::ScanConfig;
use crate::error::DropReason;
use crate::event::{AssetEvent, AssetHandler};
use crate::group::classify;
use crate::markup::MarkupHandler;
use crate::span::Location;

use pending::PendingMatch;

const LOG_TARGET: &str = "assetscan";

/// Live-match state.
#[derive(Debug, Default)]
enum ScannerState {
    /// No match open.
    #[default]
    Idle,
    /// A match is open and collecting attributes and text.
    Open(PendingMatch),
    /// A match set aside by an auto-close start, waiting for the
    /// auto-close end that finalizes it.
    PendingSwap(PendingMatch),
}

/// Scans one document, forwarding asset events to `H`.
///
/// Create a fresh scanner per document; instances share nothing.
#[derive(Debug)]
pub struct Scanner<H> {
    config: ScanConfig,
    state: ScannerState,
    handler: H,
}

impl<H: AssetHandler> Scanner<H> {
    pub fn new(handler: H) -> Self {
        Self::with_config(ScanConfig::default(), handler)
    }

    pub fn with_config(config: ScanConfig, handler: H) -> Self {
        Self {
            config,
            state: ScannerState::Idle,
            handler,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Check if a match is currently open or parked.
    pub fn has_pending(&self) -> bool {
        !matches!(self.state, ScannerState::Idle)
    }

    /// Flush any live match and return the handler.
    pub fn finish(mut self) -> H {
        self.flush();
        self.handler
    }

    fn take_state(&mut self) -> ScannerState {
        mem::take(&mut self.state)
    }

    /// Close whatever is live at its own last known end.
    fn flush(&mut self) {
        match self.take_state() {
            ScannerState::Open(m) | ScannerState::PendingSwap(m) => {
                let end = m.last_end();
                log::trace!(target: LOG_TARGET, "implicit close of <{}> at {}", m.group.tag_name(), end);
                self.finalize(m, end);
            }
            ScannerState::Idle => {}
        }
    }

    fn start_element(&mut self, name: &str, at: Location) {
        self.flush();
        if let Some(group) = classify(name) {
            log::trace!(target: LOG_TARGET, "open {:?} match <{}> at {}", group, name, at);
            self.state = ScannerState::Open(PendingMatch::new(group, at));
        }
    }

    /// Close the open match (not a parked one) at `end`.
    fn close_open(&mut self, end: Location) {
        match self.take_state() {
            ScannerState::Open(m) => self.finalize(m, end),
            other => self.state = other,
        }
    }

    fn finalize(&mut self, pending: PendingMatch, end: Location) {
        let group = pending.group;
        let start = pending.start;
        match dispatch::finish(pending, end) {
            Ok(event) => {
                log::trace!(target: LOG_TARGET, "emit {:?} at {}-{}", group, start, end);
                self.handler.handle(event);
            }
            Err(reason) => {
                log::info!(
                    target: LOG_TARGET,
                    "dropping <{}> at {}: {}",
                    group.tag_name(),
                    start,
                    reason.message()
                );
            }
        }
    }
}

impl<H: AssetHandler> MarkupHandler for Scanner<H> {
    fn document_end(&mut self, _at: Location) {
        self.flush();
    }

    fn open_element_start(&mut self, name: &str, at: Location) {
        self.start_element(name, at);
    }

    fn open_element_end(&mut self, at: Location) {
        if let ScannerState::Open(m) = &mut self.state {
            m.end = Some(at.advance(1));
        }
    }

    fn standalone_element_start(&mut self, name: &str, _minimized: bool, at: Location) {
        self.start_element(name, at);
    }

    fn standalone_element_end(&mut self, minimized: bool, at: Location) {
        // `at` is the '/' of "/>" or the '>' itself
        let skip = if minimized { 2 } else { 1 };
        self.close_open(at.advance(skip));
    }

    fn close_element_end(&mut self, at: Location) {
        self.close_open(at.advance(1));
    }

    fn auto_close_element_start(&mut self, _name: &str, _at: Location) {
        match self.take_state() {
            ScannerState::Open(m) => {
                log::trace!(target: LOG_TARGET, "park <{}> for auto-close", m.group.tag_name());
                self.state = ScannerState::PendingSwap(m);
            }
            other => self.state = other,
        }
    }

    fn auto_close_element_end(&mut self, at: Location) {
        match self.take_state() {
            ScannerState::Open(m) | ScannerState::PendingSwap(m) => self.finalize(m, at),
            ScannerState::Idle => {}
        }
    }

    fn unmatched_close_element_end(&mut self, at: Location) {
        match self.take_state() {
            ScannerState::Open(m) => {
                log::debug!(
                    target: LOG_TARGET,
                    "discarding <{}> at {}: {} at {}",
                    m.group.tag_name(),
                    m.start,
                    DropReason::UnmatchedClose.message(),
                    at
                );
            }
            other => self.state = other,
        }
    }

    fn attribute(&mut self, name: &str, value: &str, _name_at: Location, _value_at: Location) {
        if let ScannerState::Open(m) = &mut self.state {
            let link_attribute = m.group.link_attribute(&self.config);
            m.capture_attribute(link_attribute, name, value);
        }
    }

    fn text(&mut self, content: &str, _offset: usize, _at: Location) {
        if let ScannerState::Open(m) = &mut self.state {
            m.capture_text(content);
        }
    }

    fn comment(&mut self, content: &str, _content_offset: usize, outer: Range<usize>, at: Location) {
        let length = comment::adjusted_length(content.as_bytes(), outer.len());
        self.handler.handle(AssetEvent::Comment {
            content: content.to_owned(),
            start: at,
            length,
        });
    }
}
