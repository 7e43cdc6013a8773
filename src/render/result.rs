//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered HTML
    pub content: String,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counts collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of text sections rendered
    pub text_count: u32,

    /// Number of image sections rendered
    pub image_count: u32,

    /// Number of spacer sections rendered
    pub spacer_count: u32,

    /// Sections of unknown type that produced no output
    pub skipped_count: u32,

    /// Size of the rendered document in bytes
    pub byte_len: usize,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment text section count.
    pub fn add_text(&mut self) {
        self.text_count += 1;
    }

    /// Increment image section count.
    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    /// Increment spacer section count.
    pub fn add_spacer(&mut self) {
        self.spacer_count += 1;
    }

    /// Increment skipped section count.
    pub fn add_skipped(&mut self) {
        self.skipped_count += 1;
    }

    /// Total number of sections that produced output.
    pub fn rendered_count(&self) -> u32 {
        self.text_count + self.image_count + self.spacer_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counts() {
        let mut stats = RenderStats::new();
        stats.add_text();
        stats.add_text();
        stats.add_image();
        stats.add_skipped();

        assert_eq!(stats.text_count, 2);
        assert_eq!(stats.rendered_count(), 3);
        assert_eq!(stats.skipped_count, 1);
    }

    #[test]
    fn test_result_serialization() {
        let result = RenderResult::new("<html></html>".to_string(), RenderStats::new());
        assert_eq!(result.content_len(), 13);

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"text_count\":0"));
    }
}
