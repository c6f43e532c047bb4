//! Error types.
//!
//! Malformed markup never produces an `Err`: incomplete matches are
//! dropped and logged with a [`DropReason`]. Only a document that cannot
//! be tokenized at all fails with a [`ScanError`].

use thiserror::Error;

/// Stream-level failure that aborts a scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("document is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

impl From<std::str::Utf8Error> for ScanError {
    fn from(err: std::str::Utf8Error) -> Self {
        ScanError::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}

/// Why a match was discarded without an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DropReason {
    /// Link attribute absent (img, link, import)
    MissingLink = 0,
    /// Text body absent (style)
    MissingContent,
    /// Neither src nor body (script)
    MissingLinkOrContent,
    /// Close tag without an open counterpart
    UnmatchedClose,
}

impl DropReason {
    /// Get a human-readable message for this reason.
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingLink => "missing link attribute",
            Self::MissingContent => "missing content",
            Self::MissingLinkOrContent => "missing link attribute and content",
            Self::UnmatchedClose => "unmatched close tag",
        }
    }
}
