//! Section-level types.

use super::SectionId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Query parameter carrying the image alignment on the wire.
const ALIGN_PARAM: &str = "align";

/// Horizontal alignment of an image block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Flush left
    Left,
    /// Centered (the rendering default)
    #[default]
    Center,
    /// Flush right
    Right,
}

impl Alignment {
    /// All alignments, in toolbar order.
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    /// CSS keyword for this alignment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(format!("Invalid alignment: {}", other)),
        }
    }
}

/// Payload of an image section: an opaque storage reference plus an
/// alignment hint used at render time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageContent {
    /// Storage reference or URL, never containing a query string
    pub reference: String,

    /// Render-time alignment
    pub alignment: Alignment,
}

impl ImageContent {
    /// Create a centered image payload.
    ///
    /// Anything after a `?` in `reference` is parsed as wire parameters, so
    /// `ImageContent::new("a.png?align=left")` is left aligned.
    pub fn new(reference: impl Into<String>) -> Self {
        Self::parse(&reference.into())
    }

    /// Return a copy with the given alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Parse the wire form `reference[?align=<left|center|right>]`.
    ///
    /// The reference is everything before the first `?`. Later `align`
    /// parameters win over earlier ones, which also repairs strings where a
    /// parameter was appended repeatedly (`a.png?align=left?align=right`).
    /// Missing or unparseable values fall back to center.
    pub fn parse(wire: &str) -> Self {
        let (reference, query) = match wire.split_once('?') {
            Some((reference, query)) => (reference, query),
            None => (wire, ""),
        };

        let alignment = query
            .split(['&', '?'])
            .filter_map(|pair| pair.split_once('='))
            .filter(|(key, _)| *key == ALIGN_PARAM)
            .filter_map(|(_, value)| value.parse::<Alignment>().ok())
            .last()
            .unwrap_or_default();

        Self {
            reference: reference.to_string(),
            alignment,
        }
    }

    /// Path rendered as the image source: the reference up to any `?`.
    pub fn path(&self) -> &str {
        self.reference
            .split_once('?')
            .map_or(self.reference.as_str(), |(path, _)| path)
    }

    /// Wire form of this payload.
    ///
    /// The parameter is omitted for center since that is what a bare
    /// reference renders as.
    pub fn to_wire(&self) -> String {
        match self.alignment {
            Alignment::Center => self.reference.clone(),
            other => format!("{}?{}={}", self.reference, ALIGN_PARAM, other),
        }
    }
}

/// Height of a spacer block, as a CSS length literal (e.g. `"2rem"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpacerHeight(String);

impl SpacerHeight {
    /// Heights offered by the editor. Any other CSS length is accepted too.
    pub const PRESETS: [&'static str; 4] = ["1rem", "2rem", "3rem", "4rem"];

    /// Height used for new spacers and for spacers without a height.
    pub const DEFAULT: &'static str = "2rem";

    /// Create a spacer height. Blank input falls back to the default.
    pub fn new(height: impl Into<String>) -> Self {
        let height = height.into();
        let trimmed = height.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The CSS length literal.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this height is one of the editor presets.
    pub fn is_preset(&self) -> bool {
        Self::PRESETS.contains(&self.0.as_str())
    }
}

impl Default for SpacerHeight {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for SpacerHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed payload of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionContent {
    /// Rich-text HTML fragment, rendered verbatim
    Text(String),

    /// Image reference with alignment
    Image(ImageContent),

    /// Fixed-height vertical gap
    Spacer(SpacerHeight),

    /// A section type this version does not know. Kept so that loading and
    /// re-saving a template does not lose data; renders as nothing.
    Unknown {
        /// Type tag as found in the record
        kind: String,
        /// Raw content string
        content: String,
    },
}

impl SectionContent {
    /// Type tag used on the wire (`text`, `image`, `spacer`, ...).
    pub fn kind(&self) -> &str {
        match self {
            SectionContent::Text(_) => "text",
            SectionContent::Image(_) => "image",
            SectionContent::Spacer(_) => "spacer",
            SectionContent::Unknown { kind, .. } => kind,
        }
    }

    /// Build a payload from a wire type tag and content string.
    pub fn from_wire(kind: &str, content: &str) -> Self {
        match kind {
            "text" => SectionContent::Text(content.to_string()),
            "image" => SectionContent::Image(ImageContent::parse(content)),
            "spacer" => SectionContent::Spacer(SpacerHeight::new(content)),
            other => SectionContent::Unknown {
                kind: other.to_string(),
                content: content.to_string(),
            },
        }
    }

    /// Content string used on the wire.
    pub fn to_wire(&self) -> String {
        match self {
            SectionContent::Text(html) => html.clone(),
            SectionContent::Image(image) => image.to_wire(),
            SectionContent::Spacer(height) => height.as_str().to_string(),
            SectionContent::Unknown { content, .. } => content.clone(),
        }
    }

    /// Same kind of payload, with its content replaced from a wire string.
    pub fn with_wire_content(&self, content: &str) -> Self {
        Self::from_wire(self.kind(), content)
    }
}

/// One content block of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SectionRecord", into = "SectionRecord")]
pub struct Section {
    /// Identity within the owning document
    pub id: SectionId,

    /// Typed payload
    pub content: SectionContent,
}

impl Section {
    /// Create a section with a fresh id.
    pub fn new(content: SectionContent) -> Self {
        Self {
            id: SectionId::generate(),
            content,
        }
    }

    /// Create a rich-text section.
    pub fn text(html: impl Into<String>) -> Self {
        Self::new(SectionContent::Text(html.into()))
    }

    /// Create an image section from a wire reference.
    pub fn image(reference: impl Into<String>) -> Self {
        Self::new(SectionContent::Image(ImageContent::new(reference)))
    }

    /// Create a spacer section.
    pub fn spacer(height: impl Into<String>) -> Self {
        Self::new(SectionContent::Spacer(SpacerHeight::new(height)))
    }

    /// Type tag of this section.
    pub fn kind(&self) -> &str {
        self.content.kind()
    }

    /// Whether two sections carry the same payload, ignoring ids.
    pub fn same_content(&self, other: &Section) -> bool {
        self.content == other.content
    }
}

/// Persisted shape of a section: `{ "id", "type", "content" }`.
#[derive(Serialize, Deserialize)]
struct SectionRecord {
    id: SectionId,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: String,
}

impl From<SectionRecord> for Section {
    fn from(record: SectionRecord) -> Self {
        Self {
            id: record.id,
            content: SectionContent::from_wire(&record.kind, &record.content),
        }
    }
}

impl From<Section> for SectionRecord {
    fn from(section: Section) -> Self {
        Self {
            kind: section.kind().to_string(),
            content: section.content.to_wire(),
            id: section.id,
        }
    }
}
