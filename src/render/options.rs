//! Rendering options and configuration.

/// Options for rendering a document to HTML.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// `<title>` used when the document has no name
    pub title_fallback: String,

    /// `alt` attribute written on every image
    pub image_alt: String,

    /// Collect rendering statistics
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title used for unnamed documents.
    pub fn with_title_fallback(mut self, title: impl Into<String>) -> Self {
        self.title_fallback = title.into();
        self
    }

    /// Set the image alt text.
    pub fn with_image_alt(mut self, alt: impl Into<String>) -> Self {
        self.image_alt = alt.into();
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title_fallback: "Email Template".to_string(),
            image_alt: "Template image".to_string(),
            collect_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_title_fallback("Untitled")
            .with_image_alt("")
            .with_stats(true);

        assert_eq!(options.title_fallback, "Untitled");
        assert!(options.image_alt.is_empty());
        assert!(options.collect_stats);
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.title_fallback, "Email Template");
        assert_eq!(options.image_alt, "Template image");
        assert!(!options.collect_stats);
    }
}
