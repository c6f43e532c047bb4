//! Asset Scanner Core
//!
//! Streaming scanner that finds asset references in HTML-like markup
//! (images, stylesheets, scripts, inline styles and import directives) and
//! records the exact span of each, so the tag can later be spliced out or
//! rewritten in the original document.
//!
//! # Architecture
//!
//! - **group.rs** - Sorted tag registry and classification
//! - **scanner/** - Match state machine, validation, comment lengths
//! - **markup.rs** - Callback interface between tokenizer and scanner
//! - **tokenizer.rs** - HTML-tolerant tokenizer driving the callbacks
//! - **event.rs** - Asset events and the handler trait
//! - **span.rs** - Location/Span types
//!
//! # Example
//!
//! ```
//! use assetscan_core::{scan_to_vec, AssetEvent};
//!
//! let events = scan_to_vec("<img width=10 src=\"a.png\">");
//! match &events[0] {
//!     AssetEvent::ImageLink { link, attributes, span } => {
//!         assert_eq!(link, "a.png");
//!         assert_eq!(attributes["width"], "10");
//!         assert_eq!(span.to_tuple(), (1, 1, 1, 27));
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod group;
pub mod markup;
pub mod scanner;
pub mod span;
pub mod tokenizer;

pub use config::ScanConfig;
pub use error::{DropReason, ScanError};
pub use event::{AssetEvent, AssetHandler, Attributes};
pub use group::{classify, Group};
pub use markup::MarkupHandler;
pub use scanner::Scanner;
pub use span::{Location, Span};
pub use tokenizer::Tokenizer;

/// Scan a document, sending every asset event to `handler`.
///
/// Returns the handler once the whole document has been scanned.
pub fn scan_str<H: AssetHandler>(input: &str, config: &ScanConfig, handler: H) -> H {
    let mut scanner = Scanner::with_config(config.clone(), handler);
    Tokenizer::new(input).run(&mut scanner);
    scanner.finish()
}

/// Scan raw document bytes.
///
/// Fails before any event is emitted if the bytes are not UTF-8.
pub fn scan<H: AssetHandler>(input: &[u8], config: &ScanConfig, handler: H) -> Result<H, ScanError> {
    let text = std::str::from_utf8(input)?;
    Ok(scan_str(text, config, handler))
}

/// Scan with the default configuration and collect the events.
pub fn scan_to_vec(input: &str) -> Vec<AssetEvent> {
    let mut events = Vec::new();
    let _handler = scan_str(input, &ScanConfig::default(), |e: AssetEvent| events.push(e));
    events
}
