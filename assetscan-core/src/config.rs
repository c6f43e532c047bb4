//! Scanner configuration.

use std::borrow::Cow;

/// Default attribute carrying an import's workflow identifier.
pub const DEFAULT_IMPORT_ATTRIBUTE: &str = "workflowId";

/// Settings shared by every scan of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct ScanConfig {
    import_attribute: Cow<'static, str>,
}

impl ScanConfig {
    /// Use `name` as the attribute holding an import's workflow identifier.
    ///
    /// Matched case-sensitively, like every link attribute.
    pub fn with_import_attribute(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.import_attribute = name.into();
        self
    }

    #[inline]
    pub fn import_attribute(&self) -> &str {
        &self.import_attribute
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            import_attribute: Cow::Borrowed(DEFAULT_IMPORT_ATTRIBUTE),
        }
    }
}
