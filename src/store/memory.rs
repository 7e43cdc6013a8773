//! In-memory template store.

use super::{Template, TemplateStore};
use crate::error::{Error, Result};
use crate::model::Section;
use chrono::Utc;
use uuid::Uuid;

/// Template store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    templates: Vec<Template>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with templates, e.g. from a backup.
    pub fn with_templates(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// All templates in insertion order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Number of stored templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for MemoryStore {
    fn list(&self) -> Result<Vec<Template>> {
        // Reverse first so that templates created in the same instant still
        // list newest first after the stable sort.
        let mut templates: Vec<Template> = self.templates.iter().rev().cloned().collect();
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(templates)
    }

    fn create(&mut self, name: &str, sections: &[Section]) -> Result<Template> {
        let template = Template {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            content: sections.to_vec(),
            created_at: Utc::now(),
        };
        self.templates.push(template.clone());
        Ok(template)
    }

    fn update(&mut self, id: &str, name: &str, sections: &[Section]) -> Result<()> {
        let template = self
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TemplateNotFound(id.to_string()))?;
        template.name = name.to_string();
        template.content = sections.to_vec();
        Ok(())
    }
}
