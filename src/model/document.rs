//! Document-level types.

use super::{Alignment, Section, SectionContent, SectionId, SpacerHeight};
use crate::error::{Error, Result};
use crate::reorder::{self, Direction};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An email template being edited: a name plus an ordered list of sections.
///
/// Section ids are unique within a document. The document holds no selection
/// state; callers that track a selected section must clear it themselves
/// after [`Document::remove`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DocumentRecord")]
pub struct Document {
    /// Display name; may be empty while editing
    pub name: String,

    sections: Vec<Section>,
}

impl Document {
    /// Create a new empty, unnamed document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }

    /// Create a document from existing sections, e.g. a decoded HTML file or
    /// a loaded template. Sections whose id is already taken get a fresh one.
    pub fn from_sections(name: impl Into<String>, sections: Vec<Section>) -> Self {
        let mut doc = Self::named(name);
        for section in sections {
            doc.append(section);
        }
        doc
    }

    /// Sections in render order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Consume the document, returning its sections.
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get a section by id.
    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Index of a section by id.
    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    /// Add a section at the end and return the id it is stored under.
    ///
    /// If the section's id is already in use it is replaced by a freshly
    /// generated one, so the returned id may differ from `section.id`.
    pub fn append(&mut self, mut section: Section) -> SectionId {
        if self.get(&section.id).is_some() {
            let fresh = self.fresh_id();
            log::warn!(
                "Section id {} already in use, re-keyed to {}",
                section.id,
                fresh
            );
            section.id = fresh;
        }
        let id = section.id.clone();
        self.sections.push(section);
        id
    }

    /// Add a section at the end, rejecting a colliding id instead of
    /// re-keying it.
    pub fn try_append(&mut self, section: Section) -> Result<()> {
        if self.get(&section.id).is_some() {
            return Err(Error::DuplicateId(section.id));
        }
        self.sections.push(section);
        Ok(())
    }

    /// Replace the content of a section from its wire string, keeping its
    /// type and id. Returns `false` (and changes nothing) if `id` is absent.
    pub fn update_content(&mut self, id: &SectionId, content: &str) -> bool {
        match self.try_update_content(id, content) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Ignoring content update: {}", e);
                false
            }
        }
    }

    /// Like [`Document::update_content`], but reports a missing id as
    /// [`Error::NotFound`].
    pub fn try_update_content(&mut self, id: &SectionId, content: &str) -> Result<()> {
        let section = self.section_mut(id)?;
        section.content = section.content.with_wire_content(content);
        Ok(())
    }

    /// Set the alignment of an image section, replacing any previous value.
    ///
    /// Returns `false` if `id` is absent or not an image.
    pub fn set_image_alignment(&mut self, id: &SectionId, alignment: Alignment) -> bool {
        match self.section_mut(id) {
            Ok(Section {
                content: SectionContent::Image(image),
                ..
            }) => {
                image.alignment = alignment;
                true
            }
            _ => false,
        }
    }

    /// Set the height of a spacer section.
    ///
    /// Returns `false` if `id` is absent or not a spacer.
    pub fn set_spacer_height(&mut self, id: &SectionId, height: SpacerHeight) -> bool {
        match self.section_mut(id) {
            Ok(Section {
                content: SectionContent::Spacer(current),
                ..
            }) => {
                *current = height;
                true
            }
            _ => false,
        }
    }

    /// Remove a section. Returns the removed section, or `None` if absent.
    pub fn remove(&mut self, id: &SectionId) -> Option<Section> {
        let index = self.position(id)?;
        Some(self.sections.remove(index))
    }

    /// Like [`Document::remove`], but reports a missing id as
    /// [`Error::NotFound`].
    pub fn try_remove(&mut self, id: &SectionId) -> Result<Section> {
        self.remove(id).ok_or_else(|| Error::NotFound(id.clone()))
    }

    /// Move the section at `from` to `to`. Illegal moves are no-ops.
    pub fn move_section(&mut self, from: usize, to: usize) {
        self.sections = reorder::move_by_index(&self.sections, from, to);
    }

    /// Move a section one step up or down. No-op at either end.
    pub fn move_relative(&mut self, id: &SectionId, direction: Direction) {
        self.sections = reorder::move_relative(&self.sections, id, direction);
    }

    /// Apply a drag that ended with `active` dropped onto `over`.
    pub fn move_to(&mut self, active: &SectionId, over: &SectionId) {
        self.sections = reorder::move_by_id(&self.sections, active, over);
    }

    /// Replace the whole section list, e.g. after an import. Duplicate ids
    /// are re-keyed.
    pub fn replace_sections(&mut self, sections: Vec<Section>) {
        let name = std::mem::take(&mut self.name);
        *self = Self::from_sections(name, sections);
    }

    /// Visible text of the text sections, one block per line, with markup
    /// stripped. Used for previews and statistics.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .filter_map(|s| match &s.content {
                SectionContent::Text(html) => Some(strip_tags(html)),
                _ => None,
            })
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check the preconditions for persisting this document: a non-blank
    /// name and at least one section.
    pub fn validate_for_save(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(
                "Please enter a template name".to_string(),
            ));
        }
        if self.sections.is_empty() {
            return Err(Error::Validation(
                "Please add some content to your template".to_string(),
            ));
        }
        Ok(())
    }

    fn section_mut(&mut self, id: &SectionId) -> Result<&mut Section> {
        self.sections
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    fn fresh_id(&self) -> SectionId {
        let taken: HashSet<&SectionId> = self.sections.iter().map(|s| &s.id).collect();
        loop {
            let id = SectionId::generate();
            if !taken.contains(&id) {
                return id;
            }
        }
    }
}

/// Text nodes of an HTML fragment, entities decoded, whitespace collapsed.
/// Adjacent elements are separated by a space.
fn strip_tags(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deserialization goes through [`Document::from_sections`] so that records
/// with repeated ids still yield a document with unique ids.
#[derive(Deserialize)]
struct DocumentRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    sections: Vec<Section>,
}

impl From<DocumentRecord> for Document {
    fn from(record: DocumentRecord) -> Self {
        Document::from_sections(record.name, record.sections)
    }
}
