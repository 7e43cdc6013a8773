//! Template persistence boundary.
//!
//! The editor core never talks to storage itself. Callers hand a
//! [`TemplateStore`] to the helpers here, so the same code runs against the
//! in-memory store in tests and a JSON file from the CLI.

mod backup;
mod file;
mod memory;
mod template;

pub use backup::{Backup, BACKUP_VERSION};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use template::Template;

use crate::error::{Error, Result};
use crate::model::{Document, Section};

/// Key-value store of templates, keyed by template id.
pub trait TemplateStore {
    /// All templates, newest first.
    fn list(&self) -> Result<Vec<Template>>;

    /// Store a new template and return it with its assigned id.
    fn create(&mut self, name: &str, sections: &[Section]) -> Result<Template>;

    /// Overwrite the name and content of an existing template.
    fn update(&mut self, id: &str, name: &str, sections: &[Section]) -> Result<()>;

    /// Fetch one template by id.
    fn get(&self, id: &str) -> Result<Template> {
        self.list()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TemplateNotFound(id.to_string()))
    }
}

/// Persist a document: update the template `existing` if given, otherwise
/// create a new one. The document must pass
/// [`Document::validate_for_save`].
pub fn save_document<S: TemplateStore + ?Sized>(
    store: &mut S,
    existing: Option<&str>,
    doc: &Document,
) -> Result<Template> {
    doc.validate_for_save()?;
    match existing {
        Some(id) => {
            store.update(id, &doc.name, doc.sections())?;
            log::debug!("Updated template {}", id);
            store.get(id)
        }
        None => {
            let template = store.create(&doc.name, doc.sections())?;
            log::debug!("Created template {}", template.id);
            Ok(template)
        }
    }
}

/// Store a copy of `template` under the name `"<name> (Copy)"`.
pub fn duplicate_template<S: TemplateStore + ?Sized>(
    store: &mut S,
    template: &Template,
) -> Result<Template> {
    let name = format!("{} (Copy)", template.name);
    store.create(&name, &template.content)
}
