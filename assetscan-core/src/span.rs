//! Source positions for matched asset tags.
//!
//! Lines and columns are 1-based. Columns count bytes from the start of
//! the line, so a column difference is also a byte length. Only `\n`
//! starts a new line; a `\r` occupies a column like any other byte.

use std::fmt;

/// A (line, column) position in the scanned document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// Create a new location.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The same line, `n` columns further right, stopping at `u32::MAX`.
    #[inline]
    pub const fn advance(self, n: u32) -> Self {
        Self {
            line: self.line,
            column: self.column.saturating_add(n),
        }
    }

    /// Byte offset of this location within `source`.
    ///
    /// Returns `None` if the line does not exist or the column lies past
    /// the end of the line (one past the last byte of the line, i.e. the
    /// position of its `\n` or the end of input, is allowed).
    pub fn offset_in(self, source: &str) -> Option<usize> {
        if self.line == 0 || self.column == 0 {
            return None;
        }
        let bytes = source.as_bytes();
        let mut line_start = 0;
        let mut newlines = memchr::memchr_iter(b'\n', bytes);
        for _ in 1..self.line {
            line_start = newlines.next()? + 1;
        }
        let line_end = memchr::memchr(b'\n', &bytes[line_start..])
            .map(|i| line_start + i)
            .unwrap_or(bytes.len());
        let offset = line_start + (self.column as usize - 1);
        (offset <= line_end).then_some(offset)
    }
}

impl Default for Location {
    /// The first byte of the document.
    fn default() -> Self {
        Location::new(1, 1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open range `[start, end)` covering a matched tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// The four-part form `(start_line, start_col, end_line, end_col)`.
    #[inline]
    pub fn to_tuple(self) -> (u32, u32, u32, u32) {
        (
            self.start.line,
            self.start.column,
            self.end.line,
            self.end.column,
        )
    }

    /// Byte range of this span within `source`.
    pub fn byte_range(self, source: &str) -> Option<std::ops::Range<usize>> {
        let start = self.start.offset_in(source)?;
        let end = self.end.offset_in(source)?;
        (start <= end).then_some(start..end)
    }

    /// The text this span covers, if it maps onto `source`.
    pub fn slice(self, source: &str) -> Option<&str> {
        source.get(self.byte_range(source)?)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
