//! HTML template importer using scraper.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::detect::strip_bom;
use crate::error::{Error, Result};
use crate::model::{Alignment, Document, ImageContent, Section, SectionContent, SpacerHeight};
use crate::render::{RenderOptions, IMAGE_CLASS, SPACER_CLASS, TEXT_CLASS, WRAPPER_CLASS};

use super::options::{ErrorMode, ParseOptions};

/// Decodes exported HTML back into sections.
///
/// The parser accepts the renderer's output exactly and anything shaped like
/// it: a `.email-wrapper` element whose direct children carry one of the
/// section classes. Children it does not recognise are dropped. Ids are never
/// read from the markup; every decoded section gets a fresh one.
pub struct HtmlParser {
    options: ParseOptions,
}

/// Selectors and declaration patterns shared by every parser.
struct Patterns {
    wrapper: Selector,
    img: Selector,
    title: Selector,
    height: Regex,
    text_align: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        wrapper: Selector::parse(&format!(".{}", WRAPPER_CLASS)).unwrap(),
        img: Selector::parse("img").unwrap(),
        title: Selector::parse("head > title").unwrap(),
        height: Regex::new(r"(?i)(?:^|;)\s*height\s*:\s*([^;]+)").unwrap(),
        text_align: Regex::new(r"(?i)(?:^|;)\s*text-align\s*:\s*([^;]+)").unwrap(),
    })
}

impl HtmlParser {
    /// Create a parser with default (lenient) options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Decode an HTML string into sections.
    ///
    /// In lenient mode markup without a wrapper yields an empty list. In
    /// strict mode it is an [`Error::MalformedMarkup`].
    pub fn parse(&self, html: &str) -> Result<Vec<Section>> {
        let document = Html::parse_document(html);
        self.parse_html(&document)
    }

    /// Decode raw bytes. Input that is not UTF-8 cannot be markup and is
    /// reported as [`Error::MalformedMarkup`] regardless of error mode.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Vec<Section>> {
        self.parse(decode_utf8(data)?)
    }

    /// Read and decode an HTML file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Section>> {
        let data = std::fs::read(path)?;
        self.parse_bytes(&data)
    }

    /// Decode an HTML string into a named document.
    ///
    /// Names are not part of the export format; `name` is used as given. If
    /// it is blank, the page `<title>` is used unless it is the placeholder
    /// written for unnamed templates.
    pub fn parse_document(&self, html: &str, name: &str) -> Result<Document> {
        let document = Html::parse_document(html);
        let sections = self.parse_html(&document)?;

        let name = if name.trim().is_empty() {
            self.title(&document).unwrap_or_default()
        } else {
            name.to_string()
        };
        Ok(Document::from_sections(name, sections))
    }

    fn parse_html(&self, document: &Html) -> Result<Vec<Section>> {
        let mut wrappers = document.select(&patterns().wrapper);
        let Some(wrapper) = wrappers.next() else {
            return self.handle_missing_wrapper(document);
        };
        if wrappers.next().is_some() {
            log::warn!(
                "Found more than one .{} element, using the first",
                WRAPPER_CLASS
            );
        }

        let sections: Vec<Section> = wrapper
            .children()
            .filter_map(ElementRef::wrap)
            .filter_map(|child| self.parse_child(child))
            .collect();

        log::debug!("Decoded {} sections", sections.len());
        Ok(sections)
    }

    fn handle_missing_wrapper(&self, document: &Html) -> Result<Vec<Section>> {
        if self.options.error_mode == ErrorMode::Strict {
            return Err(Error::MalformedMarkup(format!(
                "no element with class '{}'",
                WRAPPER_CLASS
            )));
        }

        if !self.options.recover_orphan_images {
            log::debug!("No .{} element found, nothing to import", WRAPPER_CLASS);
            return Ok(Vec::new());
        }

        let sections: Vec<Section> = document
            .select(&patterns().img)
            .filter_map(|img| self.image_source(img))
            .map(|src| Section::new(SectionContent::Image(ImageContent::parse(&src))))
            .collect();
        log::debug!("Recovered {} orphan images", sections.len());
        Ok(sections)
    }

    fn parse_child(&self, child: ElementRef<'_>) -> Option<Section> {
        let element = child.value();
        let has_class = |class: &str| element.classes().any(|c| c == class);

        if has_class(TEXT_CLASS) {
            Some(Section::text(child.inner_html()))
        } else if has_class(IMAGE_CLASS) {
            self.parse_image(child)
        } else if has_class(SPACER_CLASS) {
            let height = element
                .attr("style")
                .and_then(|style| css_value(&patterns().height, style))
                .map(SpacerHeight::new)
                .unwrap_or_else(|| self.options.default_spacer_height.clone());
            Some(Section::new(SectionContent::Spacer(height)))
        } else {
            log::debug!("Dropping unrecognised <{}> in wrapper", element.name());
            None
        }
    }

    fn parse_image(&self, block: ElementRef<'_>) -> Option<Section> {
        let Some(src) = block
            .select(&patterns().img)
            .next()
            .and_then(|img| self.image_source(img))
        else {
            log::debug!("Dropping .{} without an image", IMAGE_CLASS);
            return None;
        };

        // References never carry a query; the inline style wins over any
        // `align` left in the src.
        let mut image = ImageContent::parse(&src);
        if let Some(alignment) = block
            .value()
            .attr("style")
            .and_then(|style| css_value(&patterns().text_align, style))
            .and_then(|value| value.parse::<Alignment>().ok())
        {
            image.alignment = alignment;
        }

        Some(Section::new(SectionContent::Image(image)))
    }

    fn image_source(&self, img: ElementRef<'_>) -> Option<String> {
        let src = img.value().attr("src")?.trim();
        if src.is_empty() {
            return None;
        }
        Some(self.resolve(src))
    }

    fn resolve(&self, src: &str) -> String {
        let Some(ref base) = self.options.base_url else {
            return src.to_string();
        };
        match Url::parse(base).and_then(|base| base.join(src)) {
            Ok(url) => url.to_string(),
            Err(e) => {
                log::warn!("Cannot resolve image '{}' against '{}': {}", src, base, e);
                src.to_string()
            }
        }
    }

    fn title(&self, document: &Html) -> Option<String> {
        let title = document
            .select(&patterns().title)
            .next()?
            .text()
            .collect::<String>();
        let title = title.trim();
        if title.is_empty() || title == RenderOptions::default().title_fallback {
            None
        } else {
            Some(title.to_string())
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// First value of a CSS declaration in an inline style attribute.
fn css_value(regex: &Regex, style: &str) -> Option<String> {
    let value = regex.captures(style)?.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn decode_utf8(data: &[u8]) -> Result<&str> {
    std::str::from_utf8(strip_bom(data))
        .map_err(|e| Error::MalformedMarkup(format!("input is not valid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = r#"<!DOCTYPE html>
<html>
<head><title>Spring Sale</title></head>
<body>
  <div class="email-wrapper">
    <div class="text-section"><h1>Spring Sale</h1><p>Up to <em>50%</em> off</p></div>
    <div class="image-section" style="text-align: left"><img src="uploads/banner.png" alt="Template image"></div>
    <div class="spacer" style="height: 3rem"></div>
    <div class="text-section"><p>See you soon</p></div>
  </div>
</body>
</html>"#;

    #[test]
    fn test_parse_canonical() {
        let sections = HtmlParser::new().parse(CANONICAL).unwrap();
        assert_eq!(sections.len(), 4);

        assert_eq!(
            sections[0].content,
            SectionContent::Text("<h1>Spring Sale</h1><p>Up to <em>50%</em> off</p>".to_string())
        );
        assert_eq!(
            sections[1].content,
            SectionContent::Image(ImageContent {
                reference: "uploads/banner.png".to_string(),
                alignment: Alignment::Left,
            })
        );
        assert_eq!(
            sections[2].content,
            SectionContent::Spacer(SpacerHeight::new("3rem"))
        );
        assert_eq!(sections[3].kind(), "text");
    }

    #[test]
    fn test_fresh_ids() {
        let sections = HtmlParser::new().parse(CANONICAL).unwrap();
        let mut ids: Vec<_> = sections.iter().map(|s| s.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), sections.len());
    }

    #[test]
    fn test_no_wrapper_is_empty() {
        let sections = HtmlParser::new()
            .parse("<html><body>hello</body></html>")
            .unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn test_no_wrapper_strict_fails() {
        let parser = HtmlParser::with_options(ParseOptions::new().strict());
        let result = parser.parse("<html><body>hello</body></html>");
        assert!(matches!(result, Err(Error::MalformedMarkup(_))));
    }

    #[test]
    fn test_image_without_img_dropped() {
        let html = r#"<div class="email-wrapper">
            <div class="image-section"><p>missing</p></div>
            <div class="text-section">kept</div>
        </div>"#;
        let sections = HtmlParser::new().parse(html).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, SectionContent::Text("kept".to_string()));
    }

    #[test]
    fn test_unlabeled_children_dropped() {
        let html = r#"<div class="email-wrapper">
            <p>stray</p>
            <div class="footer">x</div>
            <div class="spacer"></div>
        </div>"#;
        let sections = HtmlParser::new().parse(html).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].content,
            SectionContent::Spacer(SpacerHeight::new("2rem"))
        );
    }

    #[test]
    fn test_nested_sections_ignored() {
        let html = r#"<div class="email-wrapper">
            <table><tr><td><div class="text-section">nested</div></td></tr></table>
        </div>"#;
        let sections = HtmlParser::new().parse(html).unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn test_spacer_height_from_mixed_style() {
        let html = r#"<div class="email-wrapper">
            <div class="spacer" style="line-height: 1; HEIGHT : 24px ;color:red"></div>
        </div>"#;
        let sections = HtmlParser::new().parse(html).unwrap();
        assert_eq!(sections[0].content.to_wire(), "24px");
    }

    #[test]
    fn test_default_spacer_height_option() {
        let html = r#"<div class="email-wrapper"><div class="spacer"></div></div>"#;
        let parser = HtmlParser::with_options(ParseOptions::new().with_default_spacer_height("1rem"));
        let sections = parser.parse(html).unwrap();
        assert_eq!(sections[0].content.to_wire(), "1rem");
    }

    #[test]
    fn test_bad_alignment_defaults_to_center() {
        let html = r#"<div class="email-wrapper">
            <div class="image-section" style="text-align: justify"><img src="a.png"></div>
        </div>"#;
        let sections = HtmlParser::new().parse(html).unwrap();
        assert_eq!(sections[0].content.to_wire(), "a.png");
    }

    #[test]
    fn test_base_url_resolution() {
        let html = r#"<div class="email-wrapper">
            <div class="image-section"><img src="img/a.png"></div>
        </div>"#;
        let parser =
            HtmlParser::with_options(ParseOptions::new().with_base_url("https://cdn.example.com/t/"));
        let sections = parser.parse(html).unwrap();
        assert_eq!(
            sections[0].content.to_wire(),
            "https://cdn.example.com/t/img/a.png"
        );
    }

    #[test]
    fn test_image_src_query_dropped() {
        let html = r#"<div class="email-wrapper">
            <div class="image-section" style="text-align: left"><img src="https://cdn.example.com/i.png?token=abc"></div>
            <div class="image-section"><img src="b.png?align=right&amp;w=600"></div>
        </div>"#;
        let sections = HtmlParser::new().parse(html).unwrap();

        assert_eq!(
            sections[0].content,
            SectionContent::Image(
                ImageContent::new("https://cdn.example.com/i.png").with_alignment(Alignment::Left)
            )
        );
        assert_eq!(sections[1].content.to_wire(), "b.png?align=right");
    }

    #[test]
    fn test_orphan_images() {
        let html = r#"<html><body><img src="a.png"><p><img src="b.png?v=2"></p><img></body></html>"#;

        let parser = HtmlParser::with_options(ParseOptions::new().with_orphan_images(true));
        let sections = parser.parse(html).unwrap();
        let refs: Vec<String> = sections.iter().map(|s| s.content.to_wire()).collect();
        assert_eq!(refs, vec!["a.png", "b.png"]);

        assert!(HtmlParser::new().parse(html).unwrap().is_empty());
    }

    #[test]
    fn test_parser_shared_across_threads() {
        let parser = std::sync::Arc::new(HtmlParser::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let parser = parser.clone();
                std::thread::spawn(move || parser.parse(CANONICAL).unwrap().len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 4);
        }
        assert!(std::ptr::eq(patterns(), patterns()));
    }

    #[test]
    fn test_parse_bytes_rejects_non_utf8() {
        let result = HtmlParser::new().parse_bytes(&[0xFF, 0xFE, 0x00, 0xC3]);
        assert!(matches!(result, Err(Error::MalformedMarkup(_))));
    }

    #[test]
    fn test_parse_bytes_strips_bom() {
        let mut data = b"\xEF\xBB\xBF".to_vec();
        data.extend_from_slice(CANONICAL.as_bytes());
        assert_eq!(HtmlParser::new().parse_bytes(&data).unwrap().len(), 4);
    }

    #[test]
    fn test_parse_document_name() {
        let parser = HtmlParser::new();
        assert_eq!(parser.parse_document(CANONICAL, "").unwrap().name, "Spring Sale");
        assert_eq!(
            parser.parse_document(CANONICAL, "Given").unwrap().name,
            "Given"
        );

        let placeholder = CANONICAL.replace("Spring Sale</title>", "Email Template</title>");
        assert_eq!(parser.parse_document(&placeholder, "").unwrap().name, "");
    }
}
