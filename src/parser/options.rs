//! Parsing options and configuration.

use crate::model::SpacerHeight;

/// Options for decoding HTML into sections.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Height given to spacers that carry no inline height
    pub default_spacer_height: SpacerHeight,

    /// Base URL against which relative image sources are resolved
    pub base_url: Option<String>,

    /// When no wrapper is found, import every `<img>` in the page as an
    /// image section instead of returning nothing
    pub recover_orphan_images: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (unrecognised input yields no sections).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable strict mode (input without a wrapper is an error).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the default spacer height.
    pub fn with_default_spacer_height(mut self, height: impl Into<String>) -> Self {
        self.default_spacer_height = SpacerHeight::new(height);
        self
    }

    /// Set the base URL for relative image sources.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = Some(base.into());
        self
    }

    /// Enable or disable recovery of images outside the wrapper.
    pub fn with_orphan_images(mut self, recover: bool) -> Self {
        self.recover_orphan_images = recover;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            default_spacer_height: SpacerHeight::default(),
            base_url: None,
            recover_orphan_images: false,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail when the input has no recognisable wrapper
    Strict,
    /// Return whatever is recognisable, possibly nothing
    #[default]
    Lenient,
}
