//! HTML-tolerant tokenizer driving a [`MarkupHandler`].
//!
//! Not a conforming HTML tokenizer: it knows just enough to find tags,
//! attributes, comments and raw-text bodies with exact positions.
//!
//! - `/>` ends a standalone (minimized) element; void elements such as
//!   `<img>` are standalone without it.
//! - `<script>`, `<style>` and the other raw-text elements take everything
//!   up to their matching close tag as a single text callback.
//! - A close tag auto-closes the open elements nested inside its match; a
//!   close tag with no open match is reported as unmatched.
//! - An incomplete tag (no `>`, unterminated quote) is plain text, and so
//!   is everything after it: markup cut off by the end of input ends tag
//!   recognition, so every `<` is scanned past at most once.
//! - At end of input every open element is auto-closed.

use std::ops::Range;

use memchr::{memchr, memmem};
use phf::{phf_set, Set};

use crate::markup::MarkupHandler;
use crate::span::Location;

const LOG_TARGET: &str = "assetscan.tokenizer";

/// Elements that never have content or a close tag.
static VOID_ELEMENTS: Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
};

/// Elements whose body is raw text up to the matching close tag.
static RAW_TEXT_ELEMENTS: Set<&'static str> = phf_set! {
    "script", "style", "textarea", "title", "xmp", "iframe",
    "noembed", "noframes",
};

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

/// Incremental byte offset to (line, column) conversion.
///
/// Cheap while positions are requested in increasing order; an earlier
/// position restarts the count from the beginning.
#[derive(Debug)]
struct LineTracker {
    line: u32,
    line_start: usize,
    scanned: usize,
}

impl LineTracker {
    fn new() -> Self {
        Self {
            line: 1,
            line_start: 0,
            scanned: 0,
        }
    }

    fn locate(&mut self, bytes: &[u8], pos: usize) -> Location {
        if pos < self.scanned {
            *self = Self::new();
        }
        let base = self.scanned;
        for idx in memchr::memchr_iter(b'\n', &bytes[base..pos]) {
            self.line += 1;
            self.line_start = base + idx + 1;
        }
        self.scanned = pos;
        Location::new(self.line, (pos - self.line_start + 1) as u32)
    }
}

#[derive(Debug)]
struct Attr<'a> {
    name: &'a str,
    value: &'a str,
    name_pos: usize,
    value_pos: usize,
}

#[derive(Debug, Clone, Copy)]
enum TagEnd {
    /// Position of the `>`.
    Open(usize),
    /// Position of the `/` in `/>`.
    Minimized(usize),
}

/// A structure found at a `<`. Positions are byte offsets.
#[derive(Debug)]
enum Markup<'a> {
    Start {
        name: &'a str,
        attrs: Vec<Attr<'a>>,
        end: TagEnd,
    },
    End {
        name: &'a str,
        gt: usize,
    },
    Comment {
        content: Range<usize>,
        outer: Range<usize>,
    },
    /// `<!DOCTYPE ...>`, `<?xml ...?>` and friends: skipped.
    Declaration,
}

/// Why a `<` starts no markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotMarkup {
    /// A plain `<` character.
    Text,
    /// Markup cut off by the end of input.
    Truncated,
}

type Found<T> = Result<(T, usize), NotMarkup>;

/// Tokenizer over one document.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    lines: LineTracker,
    /// Lowercased names of open elements, innermost last.
    stack: Vec<String>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            lines: LineTracker::new(),
            stack: Vec::new(),
        }
    }

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    #[inline]
    fn locate(&mut self, pos: usize) -> Location {
        let bytes = self.input.as_bytes();
        self.lines.locate(bytes, pos)
    }

    fn skip_space(&self, mut p: usize) -> usize {
        let bytes = self.bytes();
        while p < bytes.len() && is_space(bytes[p]) {
            p += 1;
        }
        p
    }

    /// End of a tag name starting at `p`.
    fn name_end(&self, mut p: usize) -> usize {
        let bytes = self.bytes();
        while p < bytes.len() && !is_space(bytes[p]) && bytes[p] != b'/' && bytes[p] != b'>' {
            p += 1;
        }
        p
    }

    /// Run over the whole document, calling `handler` in document order.
    pub fn run<H: MarkupHandler + ?Sized>(mut self, handler: &mut H) {
        handler.document_start();

        let bytes = self.bytes();
        let mut text_start = 0;
        let mut text_at = self.locate(0);

        while let Some(rel) = memchr(b'<', &bytes[self.pos..]) {
            let lt = self.pos + rel;
            match self.markup_at(lt) {
                Ok((markup, next)) => {
                    self.flush_text(text_start, lt, text_at, handler);
                    let resume = self.emit(lt, markup, next, handler);
                    self.pos = resume;
                    text_start = resume;
                    text_at = self.locate(resume);
                }
                Err(NotMarkup::Text) => self.pos = lt + 1,
                Err(NotMarkup::Truncated) => {
                    log::trace!(target: LOG_TARGET, "markup at byte {} runs off the end, rest is text", lt);
                    break;
                }
            }
        }

        self.flush_text(text_start, bytes.len(), text_at, handler);

        let end = self.locate(bytes.len());
        while let Some(name) = self.stack.pop() {
            log::trace!(target: LOG_TARGET, "auto-closing <{}> at end of input", name);
            handler.auto_close_element_start(&name, end);
            handler.auto_close_element_end(end);
        }
        handler.document_end(end);
    }

    fn flush_text<H: MarkupHandler + ?Sized>(
        &self,
        start: usize,
        end: usize,
        at: Location,
        handler: &mut H,
    ) {
        if end > start {
            handler.text(&self.input[start..end], start, at);
        }
    }

    /// Recognize the structure starting at `lt`, returning it with the
    /// position just after it.
    fn markup_at(&self, lt: usize) -> Found<Markup<'a>> {
        let bytes = self.bytes();
        match *bytes.get(lt + 1).ok_or(NotMarkup::Truncated)? {
            b'!' if bytes[lt..].starts_with(b"<!--") => Ok(self.comment_at(lt)),
            b'!' | b'?' => {
                let gt = self.find_gt(lt + 2)?;
                Ok((Markup::Declaration, gt + 1))
            }
            b'/' => {
                let name_start = lt + 2;
                if !bytes.get(name_start).ok_or(NotMarkup::Truncated)?.is_ascii_alphabetic() {
                    return Err(NotMarkup::Text);
                }
                let name_end = self.name_end(name_start);
                let gt = self.find_gt(name_end)?;
                let name = &self.input[name_start..name_end];
                Ok((Markup::End { name, gt }, gt + 1))
            }
            b if b.is_ascii_alphabetic() => self.start_tag_at(lt),
            _ => Err(NotMarkup::Text),
        }
    }

    /// Position of the first `>` at or after `from`.
    fn find_gt(&self, from: usize) -> Result<usize, NotMarkup> {
        let rest = self.bytes().get(from..).ok_or(NotMarkup::Truncated)?;
        memchr(b'>', rest)
            .map(|i| from + i)
            .ok_or(NotMarkup::Truncated)
    }

    fn comment_at(&self, lt: usize) -> (Markup<'a>, usize) {
        let bytes = self.bytes();
        let content_start = lt + 4;
        let (content_end, outer_end) = match memmem::find(&bytes[content_start..], b"-->") {
            Some(i) => (content_start + i, content_start + i + 3),
            None => (bytes.len(), bytes.len()),
        };
        let markup = Markup::Comment {
            content: content_start..content_end,
            outer: lt..outer_end,
        };
        (markup, outer_end)
    }

    fn start_tag_at(&self, lt: usize) -> Found<Markup<'a>> {
        let bytes = self.bytes();
        let name_end = self.name_end(lt + 1);
        let name = &self.input[lt + 1..name_end];
        let mut attrs = Vec::new();
        let mut p = name_end;

        loop {
            p = self.skip_space(p);
            match *bytes.get(p).ok_or(NotMarkup::Truncated)? {
                b'>' => {
                    let markup = Markup::Start {
                        name,
                        attrs,
                        end: TagEnd::Open(p),
                    };
                    return Ok((markup, p + 1));
                }
                b'/' if bytes.get(p + 1) == Some(&b'>') => {
                    let markup = Markup::Start {
                        name,
                        attrs,
                        end: TagEnd::Minimized(p),
                    };
                    return Ok((markup, p + 2));
                }
                b'/' => p += 1,
                _ => {
                    let (attr, next) = self.attribute_at(p)?;
                    attrs.push(attr);
                    p = next;
                }
            }
        }
    }

    /// Parse `name`, `name=value`, `name='value'` or `name="value"` at `p`.
    fn attribute_at(&self, p: usize) -> Found<Attr<'a>> {
        let bytes = self.bytes();
        let name_pos = p;
        // the first byte belongs to the name even if it is '='
        let mut q = p + 1;
        while q < bytes.len() && !is_space(bytes[q]) && !matches!(bytes[q], b'=' | b'>' | b'/') {
            q += 1;
        }
        let name = &self.input[name_pos..q];

        let eq = self.skip_space(q);
        if bytes.get(eq) != Some(&b'=') {
            let attr = Attr {
                name,
                value: "",
                name_pos,
                value_pos: q,
            };
            return Ok((attr, q));
        }

        let v = self.skip_space(eq + 1);
        match *bytes.get(v).ok_or(NotMarkup::Truncated)? {
            quote @ (b'"' | b'\'') => {
                let value_pos = v + 1;
                let close = memchr(quote, &bytes[value_pos..])
                    .map(|i| value_pos + i)
                    .ok_or(NotMarkup::Truncated)?;
                let attr = Attr {
                    name,
                    value: &self.input[value_pos..close],
                    name_pos,
                    value_pos,
                };
                Ok((attr, close + 1))
            }
            _ => {
                let mut end = v;
                while end < bytes.len() {
                    let b = bytes[end];
                    if is_space(b) || b == b'>' || (b == b'/' && bytes.get(end + 1) == Some(&b'>')) {
                        break;
                    }
                    end += 1;
                }
                let attr = Attr {
                    name,
                    value: &self.input[v..end],
                    name_pos,
                    value_pos: v,
                };
                Ok((attr, end))
            }
        }
    }

    /// Report `markup` and return where scanning resumes.
    fn emit<H: MarkupHandler + ?Sized>(
        &mut self,
        lt: usize,
        markup: Markup<'a>,
        next: usize,
        handler: &mut H,
    ) -> usize {
        match markup {
            Markup::Start { name, attrs, end } => self.emit_start(lt, name, &attrs, end, next, handler),
            Markup::End { name, gt } => {
                self.emit_end(lt, name, gt, handler);
                next
            }
            Markup::Comment { content, outer } => {
                let at = self.locate(lt);
                let text = &self.input[content.clone()];
                handler.comment(text, content.start, outer, at);
                next
            }
            Markup::Declaration => next,
        }
    }

    fn emit_attrs<H: MarkupHandler + ?Sized>(&mut self, attrs: &[Attr<'a>], handler: &mut H) {
        for attr in attrs {
            let name_at = self.locate(attr.name_pos);
            let value_at = self.locate(attr.value_pos);
            handler.attribute(attr.name, attr.value, name_at, value_at);
        }
    }

    fn emit_start<H: MarkupHandler + ?Sized>(
        &mut self,
        lt: usize,
        name: &'a str,
        attrs: &[Attr<'a>],
        end: TagEnd,
        next: usize,
        handler: &mut H,
    ) -> usize {
        let lower = name.to_ascii_lowercase();
        let at = self.locate(lt);

        let gt = match end {
            TagEnd::Minimized(slash) => {
                handler.standalone_element_start(name, true, at);
                self.emit_attrs(attrs, handler);
                let end_at = self.locate(slash);
                handler.standalone_element_end(true, end_at);
                return next;
            }
            TagEnd::Open(gt) if VOID_ELEMENTS.contains(lower.as_str()) => {
                handler.standalone_element_start(name, false, at);
                self.emit_attrs(attrs, handler);
                let end_at = self.locate(gt);
                handler.standalone_element_end(false, end_at);
                return next;
            }
            TagEnd::Open(gt) => gt,
        };

        handler.open_element_start(name, at);
        self.emit_attrs(attrs, handler);
        let end_at = self.locate(gt);
        handler.open_element_end(end_at);

        let raw = RAW_TEXT_ELEMENTS.contains(lower.as_str());
        self.stack.push(lower);
        if !raw {
            return next;
        }

        // the close tag itself is picked up by the main loop
        let body_end = self.raw_text_end(next).unwrap_or(self.input.len());
        if body_end > next {
            let body_at = self.locate(next);
            handler.text(&self.input[next..body_end], next, body_at);
        }
        body_end
    }

    /// Position of the `</name` closing the innermost raw-text element.
    fn raw_text_end(&self, from: usize) -> Option<usize> {
        let bytes = self.bytes();
        let name = self.stack.last()?.as_bytes();
        let mut search = from;
        while let Some(rel) = memmem::find(&bytes[search..], b"</") {
            let lt = search + rel;
            let name_end = lt + 2 + name.len();
            let name_matches = bytes
                .get(lt + 2..name_end)
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name));
            if name_matches {
                match bytes.get(name_end) {
                    Some(&b) if is_space(b) || b == b'/' || b == b'>' => {
                        // an unterminated close tag cannot end the body
                        return memchr(b'>', &bytes[name_end..]).map(|_| lt);
                    }
                    _ => {}
                }
            }
            search = lt + 2;
        }
        None
    }

    fn emit_end<H: MarkupHandler + ?Sized>(
        &mut self,
        lt: usize,
        name: &'a str,
        gt: usize,
        handler: &mut H,
    ) {
        let lower = name.to_ascii_lowercase();
        let at = self.locate(lt);

        let Some(idx) = self.stack.iter().rposition(|open| *open == lower) else {
            handler.unmatched_close_element_start(name, at);
            let end_at = self.locate(gt);
            handler.unmatched_close_element_end(end_at);
            return;
        };

        while self.stack.len() > idx + 1 {
            if let Some(inner) = self.stack.pop() {
                log::trace!(target: LOG_TARGET, "auto-closing <{}> at </{}>", inner, name);
                handler.auto_close_element_start(&inner, at);
                handler.auto_close_element_end(at);
            }
        }
        self.stack.pop();

        handler.close_element_start(name, at);
        let end_at = self.locate(gt);
        handler.close_element_end(end_at);
    }
}
