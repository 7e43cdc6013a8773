//! # mailblock
//!
//! Block-based email templates for Rust.
//!
//! A template is an ordered list of sections (rich text, images, spacers)
//! plus a name. This library edits that list in memory and converts it to
//! and from a standalone, responsive HTML document.
//!
//! ## Quick Start
//!
//! ```
//! use mailblock::{decode, encode, Document, Section};
//!
//! let mut doc = Document::named("Welcome");
//! doc.append(Section::text("<h1>Hello!</h1>"));
//! doc.append(Section::spacer("2rem"));
//! doc.append(Section::image("uploads/logo.png?align=left"));
//!
//! let html = encode(&doc);
//! let sections = decode(&html)?;
//! assert_eq!(sections.len(), 3);
//! # Ok::<(), mailblock::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Typed sections**: image alignment and spacer height are real values,
//!   not query strings glued onto a path
//! - **Round-tripping HTML**: anything [`encode`] writes, [`decode`] reads
//!   back with the same sections in the same order
//! - **Lenient import**: foreign HTML never fails, it just yields what is
//!   recognisable
//! - **Pluggable storage**: templates persist through the
//!   [`store::TemplateStore`] trait, with in-memory and JSON file stores
//!   included

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod reorder;
pub mod store;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, ImportFormat};
pub use error::{Error, Result};
pub use model::{Alignment, Document, ImageContent, Section, SectionContent, SectionId, SpacerHeight};
pub use parser::{ErrorMode, HtmlParser, ParseOptions};
pub use render::{JsonFormat, RenderOptions, RenderResult, RenderStats};
pub use reorder::Direction;
pub use store::{Backup, JsonFileStore, MemoryStore, Template, TemplateStore};

use std::path::Path;

/// Render a document to a standalone HTML document with default options.
///
/// # Example
///
/// ```
/// use mailblock::{encode, Document};
///
/// let html = encode(&Document::new());
/// assert!(html.contains("class=\"email-wrapper\""));
/// ```
pub fn encode(doc: &Document) -> String {
    render::to_html(doc, &RenderOptions::default())
}

/// Decode exported HTML into sections with default (lenient) options.
///
/// The template name is not part of the HTML; use [`decode_document`] or
/// [`Document::from_sections`] to attach one.
///
/// # Example
///
/// ```
/// use mailblock::decode;
///
/// let sections = decode("<html><body>hello</body></html>").unwrap();
/// assert!(sections.is_empty());
/// ```
pub fn decode(html: &str) -> Result<Vec<Section>> {
    HtmlParser::new().parse(html)
}

/// Decode exported HTML into a named document.
pub fn decode_document(html: &str, name: &str) -> Result<Document> {
    HtmlParser::new().parse_document(html, name)
}

/// Decode an HTML file into sections.
///
/// # Example
///
/// ```no_run
/// use mailblock::decode_file;
///
/// let sections = decode_file("newsletter.html").unwrap();
/// println!("{} sections", sections.len());
/// ```
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Vec<Section>> {
    HtmlParser::new().parse_file(path)
}

/// What an import file turned out to contain.
#[derive(Debug, Clone)]
pub enum Imported {
    /// A single template (HTML export or JSON document)
    Document(Document),
    /// A backup of many templates
    Backup(Backup),
}

/// Import an HTML export, JSON document or JSON backup, detected by content.
///
/// `name` is used for HTML imports, which carry no name of their own.
pub fn import_bytes(data: &[u8], name: &str) -> Result<Imported> {
    let data = detect::strip_bom(data);
    match detect_format_from_bytes(data)? {
        ImportFormat::Html => {
            let sections = HtmlParser::new().parse_bytes(data)?;
            Ok(Imported::Document(Document::from_sections(name, sections)))
        }
        ImportFormat::Document => Ok(Imported::Document(serde_json::from_slice(data)?)),
        ImportFormat::Backup => Ok(Imported::Backup(Backup::from_slice(data)?)),
    }
}

/// Import a file, see [`import_bytes`].
pub fn import_file<P: AsRef<Path>>(path: P, name: &str) -> Result<Imported> {
    let data = std::fs::read(path)?;
    import_bytes(&data, name)
}

/// Import a file without blocking the async runtime's worker on file I/O.
#[cfg(feature = "async")]
pub async fn import_file_async<P: AsRef<Path>>(path: P, name: &str) -> Result<Imported> {
    let data = tokio::fs::read(path).await?;
    import_bytes(&data, name)
}

/// Builder for encoding and decoding with custom options.
///
/// # Example
///
/// ```
/// use mailblock::{Document, Mailblock, Section};
///
/// let codec = Mailblock::new()
///     .with_title_fallback("Untitled")
///     .with_base_url("https://cdn.example.com/")
///     .strict();
///
/// let mut doc = Document::named("Digest");
/// doc.append(Section::image("img/a.png"));
///
/// let html = codec.encode(&doc);
/// let back = codec.decode(&html, "Digest")?;
/// assert_eq!(back.sections()[0].content.to_wire(), "https://cdn.example.com/img/a.png");
/// # Ok::<(), mailblock::Error>(())
/// ```
pub struct Mailblock {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Mailblock {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Reject HTML without a wrapper instead of returning no sections.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Resolve relative image sources against `base` when decoding.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_base_url(base);
        self
    }

    /// Import stray images when no wrapper is found.
    pub fn with_orphan_images(mut self) -> Self {
        self.parse_options = self.parse_options.with_orphan_images(true);
        self
    }

    /// Set the `<title>` used for unnamed documents.
    pub fn with_title_fallback(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title_fallback(title);
        self
    }

    /// Set the image alt text.
    pub fn with_image_alt(mut self, alt: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_image_alt(alt);
        self
    }

    /// Render a document to HTML.
    pub fn encode(&self, doc: &Document) -> String {
        render::to_html(doc, &self.render_options)
    }

    /// Render a document to HTML with statistics.
    pub fn encode_with_stats(&self, doc: &Document) -> RenderResult {
        render::to_html_with_stats(doc, &self.render_options)
    }

    /// Decode HTML into a named document.
    pub fn decode(&self, html: &str, name: &str) -> Result<Document> {
        HtmlParser::with_options(self.parse_options.clone()).parse_document(html, name)
    }
}

impl Default for Mailblock {
    fn default() -> Self {
        Self::new()
    }
}
