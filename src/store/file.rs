//! Template store persisted as a single JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use super::{MemoryStore, Template, TemplateStore};
use crate::error::Result;
use crate::model::Section;

/// Template store backed by one JSON file holding an array of templates.
///
/// The whole file is read on open and rewritten after every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open a store file. A missing file is treated as an empty store and is
    /// created on the first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let templates = if path.exists() {
            let data = fs::read_to_string(&path)?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)?
            }
        } else {
            log::debug!("Store file {} does not exist yet", path.display());
            Vec::new()
        };

        Ok(Self {
            path,
            inner: MemoryStore::with_templates(templates),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(self.inner.templates())?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl TemplateStore for JsonFileStore {
    fn list(&self) -> Result<Vec<Template>> {
        self.inner.list()
    }

    fn create(&mut self, name: &str, sections: &[Section]) -> Result<Template> {
        let template = self.inner.create(name, sections)?;
        self.persist()?;
        Ok(template)
    }

    fn update(&mut self, id: &str, name: &str, sections: &[Section]) -> Result<()> {
        self.inner.update(id, name, sections)?;
        self.persist()
    }
}
