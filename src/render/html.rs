//! HTML rendering for template documents.
//!
//! The output is a complete HTML document whose body holds a single wrapper
//! element with one child per section, in document order. The class names
//! and stylesheet below are the export format: the parser locates sections
//! by the same class names, so changing them breaks import of older exports.

use crate::model::{Document, ImageContent, Section, SectionContent, SpacerHeight};

use super::{RenderOptions, RenderResult, RenderStats};

/// Class of the element wrapping all sections.
pub const WRAPPER_CLASS: &str = "email-wrapper";

/// Class of a rich-text section block.
pub const TEXT_CLASS: &str = "text-section";

/// Class of an image section block.
pub const IMAGE_CLASS: &str = "image-section";

/// Class of a spacer block.
pub const SPACER_CLASS: &str = "spacer";

const HEAD_START: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
"#;

const STYLESHEET: &str = r#"  <style>
    .email-wrapper {
      max-width: 600px;
      margin: 0 auto;
      padding: 20px;
      font-family: Arial, sans-serif;
    }
    .text-section {
      margin-bottom: 20px;
      line-height: 1.6;
    }
    .image-section {
      margin-bottom: 20px;
    }
    .image-section img {
      max-width: 100%;
      height: auto;
      display: block;
    }
    .spacer {
      display: block;
      width: 100%;
    }
    @media only screen and (max-width: 600px) {
      .email-wrapper {
        width: 100% !important;
        padding: 10px !important;
      }
    }
  </style>
</head>
"#;

const SECTION_INDENT: &str = "    ";

/// Convert a document to a standalone HTML document.
///
/// Rendering cannot fail: section content is trusted markup and is written
/// as is.
pub fn to_html(doc: &Document, options: &RenderOptions) -> String {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to HTML with statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> RenderResult {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = HtmlRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: RenderStats,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
        }
    }

    /// Render a document to HTML.
    pub fn render(mut self, doc: &Document) -> String {
        self.render_internal(doc)
    }

    /// Render a document to HTML with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> RenderResult {
        self.options.collect_stats = true;
        let content = self.render_internal(doc);
        self.stats.byte_len = content.len();
        RenderResult::new(content, self.stats)
    }

    fn render_internal(&mut self, doc: &Document) -> String {
        let mut output = String::with_capacity(2048);

        output.push_str(HEAD_START);
        let title = if doc.name.trim().is_empty() {
            self.options.title_fallback.as_str()
        } else {
            doc.name.as_str()
        };
        output.push_str("  <title>");
        output.push_str(&escape_html(title));
        output.push_str("</title>\n");
        output.push_str(STYLESHEET);

        output.push_str("<body>\n  <div class=\"");
        output.push_str(WRAPPER_CLASS);
        output.push_str("\">\n");
        for section in doc.sections() {
            self.render_section(&mut output, section);
        }
        output.push_str("  </div>\n</body>\n</html>");

        output
    }

    fn render_section(&mut self, output: &mut String, section: &Section) {
        match &section.content {
            SectionContent::Text(html) => {
                if self.options.collect_stats {
                    self.stats.add_text();
                }
                self.render_text(output, html);
            }
            SectionContent::Image(image) => {
                if self.options.collect_stats {
                    self.stats.add_image();
                }
                self.render_image(output, image);
            }
            SectionContent::Spacer(height) => {
                if self.options.collect_stats {
                    self.stats.add_spacer();
                }
                self.render_spacer(output, height);
            }
            SectionContent::Unknown { kind, .. } => {
                if self.options.collect_stats {
                    self.stats.add_skipped();
                }
                log::debug!("Skipping section {} of unknown type '{}'", section.id, kind);
            }
        }
    }

    fn render_text(&self, output: &mut String, html: &str) {
        output.push_str(SECTION_INDENT);
        output.push_str(&format!("<div class=\"{}\">", TEXT_CLASS));
        output.push_str(html);
        output.push_str("</div>\n");
    }

    fn render_image(&self, output: &mut String, image: &ImageContent) {
        output.push_str(SECTION_INDENT);
        output.push_str(&format!(
            "<div class=\"{}\" style=\"text-align: {}\"><img src=\"{}\" alt=\"{}\" style=\"margin: 0 auto;\"></div>\n",
            IMAGE_CLASS,
            image.alignment,
            escape_html(image.path()),
            escape_html(&self.options.image_alt),
        ));
    }

    /// The height is written as given except for attribute escaping, so a
    /// value containing `"` cannot end the `style` attribute early. The
    /// decoder reads the unescaped value back.
    fn render_spacer(&self, output: &mut String, height: &SpacerHeight) {
        output.push_str(SECTION_INDENT);
        output.push_str(&format!(
            "<div class=\"{}\" style=\"height: {}\"></div>\n",
            SPACER_CLASS,
            escape_html(height.as_str()),
        ));
    }
}

/// Escape text for use in element content or a double-quoted attribute.
fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, SectionId};

    fn render(doc: &Document) -> String {
        to_html(doc, &RenderOptions::default())
    }

    #[test]
    fn test_empty_document() {
        let html = render(&Document::new());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("<title>Email Template</title>"));
        assert!(html.contains("<div class=\"email-wrapper\">\n  </div>"));
    }

    #[test]
    fn test_wire_constants() {
        let html = render(&Document::new());
        assert!(html.contains("max-width: 600px;"));
        assert!(html.contains("margin: 0 auto;"));
        assert!(html.contains("@media only screen and (max-width: 600px)"));
        assert!(html.contains("padding: 10px !important;"));
    }

    #[test]
    fn test_text_is_verbatim() {
        let mut doc = Document::named("Hi");
        doc.append(Section::text("<p><strong>Bold</strong> &amp; more</p>"));
        let html = render(&doc);
        assert!(html.contains(
            "<div class=\"text-section\"><p><strong>Bold</strong> &amp; more</p></div>"
        ));
    }

    #[test]
    fn test_image_alignment_and_path() {
        let mut doc = Document::new();
        doc.append(Section::image("uploads/a.png?align=right"));
        doc.append(Section::image("uploads/b.png"));
        let html = render(&doc);

        assert!(html.contains(
            "<div class=\"image-section\" style=\"text-align: right\"><img src=\"uploads/a.png\""
        ));
        assert!(html.contains(
            "<div class=\"image-section\" style=\"text-align: center\"><img src=\"uploads/b.png\""
        ));
        assert!(!html.contains("?align"));
    }

    #[test]
    fn test_image_src_is_path_only() {
        let mut doc = Document::new();
        doc.append(Section::new(SectionContent::Image(ImageContent {
            reference: "https://cdn.example.com/i.png?token=abc".to_string(),
            alignment: Alignment::Right,
        })));
        let html = render(&doc);
        assert!(html.contains("<img src=\"https://cdn.example.com/i.png\""));
        assert!(!html.contains("token"));
    }

    #[test]
    fn test_spacer_height() {
        let mut doc = Document::new();
        doc.append(Section::spacer("3rem"));
        let html = render(&doc);
        assert!(html.contains("<div class=\"spacer\" style=\"height: 3rem\"></div>"));
    }

    #[test]
    fn test_spacer_height_attribute_escaped() {
        let mut doc = Document::new();
        doc.append(Section::spacer("2rem\" onload=\"x"));
        let html = render(&doc);
        assert!(html.contains("style=\"height: 2rem&quot; onload=&quot;x\""));

        let sections = crate::decode(&html).unwrap();
        assert_eq!(sections[0].content.to_wire(), "2rem\" onload=\"x");
    }

    #[test]
    fn test_order_preserved() {
        let mut doc = Document::new();
        doc.append(Section::text("<p>first</p>"));
        doc.append(Section::spacer("1rem"));
        doc.append(Section::text("<p>second</p>"));
        let html = render(&doc);

        let first = html.find("first").unwrap();
        let spacer = html.find("class=\"spacer\"").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < spacer && spacer < second);
    }

    #[test]
    fn test_unknown_kind_renders_nothing() {
        let mut doc = Document::new();
        doc.append(Section {
            id: SectionId::from("b1"),
            content: SectionContent::Unknown {
                kind: "button".to_string(),
                content: "Buy".to_string(),
            },
        });
        let result = to_html_with_stats(&doc, &RenderOptions::default());
        assert!(!result.content.contains("Buy"));
        assert_eq!(result.stats.skipped_count, 1);
        assert_eq!(result.stats.rendered_count(), 0);
    }

    #[test]
    fn test_title_escaped() {
        let doc = Document::named("News & <Deals>");
        let html = render(&doc);
        assert!(html.contains("<title>News &amp; &lt;Deals&gt;</title>"));
    }

    #[test]
    fn test_stats() {
        let mut doc = Document::new();
        doc.append(Section::text("a"));
        doc.append(Section::new(SectionContent::Image(
            ImageContent::new("x.png").with_alignment(Alignment::Left),
        )));
        doc.append(Section::spacer("1rem"));
        let result = to_html_with_stats(&doc, &RenderOptions::default());
        assert_eq!(result.stats.text_count, 1);
        assert_eq!(result.stats.image_count, 1);
        assert_eq!(result.stats.spacer_count, 1);
        assert_eq!(result.stats.byte_len, result.content_len());
    }
}
