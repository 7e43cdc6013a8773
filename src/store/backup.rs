//! Backup envelope for exporting every stored template at once.

use super::{Template, TemplateStore};
use crate::detect::strip_bom;
use crate::error::Result;
use crate::render::JsonFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version written into new backups.
pub const BACKUP_VERSION: &str = "1.0";

/// `{ version, date, templates }` dump of a template store.
///
/// Backups are not migrated: whatever the store returned is written as is,
/// and reading accepts any version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backup {
    /// Envelope version
    pub version: String,

    /// When the backup was taken
    pub date: DateTime<Utc>,

    /// Stored templates
    pub templates: Vec<Template>,
}

impl Backup {
    /// Wrap templates in a backup envelope dated now.
    pub fn new(templates: Vec<Template>) -> Self {
        Self {
            version: BACKUP_VERSION.to_string(),
            date: Utc::now(),
            templates,
        }
    }

    /// Back up everything in a store.
    pub fn from_store<S: TemplateStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(Self::new(store.list()?))
    }

    /// Serialize the backup.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let json = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self)?,
            JsonFormat::Compact => serde_json::to_string(self)?,
        };
        Ok(json)
    }

    /// Read a backup.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_slice(json.as_bytes())
    }

    /// Read a backup from raw file contents, which may start with a BOM.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let backup: Backup = serde_json::from_slice(strip_bom(data))?;
        if backup.version != BACKUP_VERSION {
            log::warn!(
                "Backup version {} differs from {}, reading as is",
                backup.version,
                BACKUP_VERSION
            );
        }
        Ok(backup)
    }

    /// Default file name, e.g. `email-templates-backup-2024-03-01T10:00:00.000Z.json`.
    pub fn suggested_filename(&self) -> String {
        format!(
            "email-templates-backup-{}.json",
            self.date.format("%Y-%m-%dT%H:%M:%S%.3fZ")
        )
    }

    /// Re-create every template of this backup in `store`, oldest first.
    /// Stores assign new ids and creation times.
    pub fn restore_into<S: TemplateStore + ?Sized>(&self, store: &mut S) -> Result<Vec<Template>> {
        let mut ordered: Vec<&Template> = self.templates.iter().collect();
        ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        ordered
            .into_iter()
            .map(|t| store.create(&t.name, &t.content))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;
    use crate::store::MemoryStore;

    #[test]
    fn test_backup_envelope() {
        let mut store = MemoryStore::new();
        store.create("A", &[Section::text("<p>a</p>")]).unwrap();
        store.create("B", &[Section::image("b.png?align=left")]).unwrap();

        let backup = Backup::from_store(&store).unwrap();
        let json = backup.to_json(JsonFormat::Pretty).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], "1.0");
        assert!(value["date"].is_string());
        assert_eq!(value["templates"].as_array().unwrap().len(), 2);
        assert_eq!(value["templates"][0]["content"][0]["content"], "b.png?align=left");
    }

    #[test]
    fn test_backup_from_slice_with_bom() {
        let backup = Backup::new(Vec::new());
        let mut data = b"\xEF\xBB\xBF".to_vec();
        data.extend_from_slice(backup.to_json(JsonFormat::Pretty).unwrap().as_bytes());
        assert_eq!(Backup::from_slice(&data).unwrap(), backup);
    }

    #[test]
    fn test_backup_roundtrip_and_restore() {
        let mut store = MemoryStore::new();
        store.create("Old", &[Section::spacer("3rem")]).unwrap();
        let backup = Backup::from_store(&store).unwrap();

        let json = backup.to_json(JsonFormat::Compact).unwrap();
        let read = Backup::from_json(&json).unwrap();
        assert_eq!(read, backup);

        let mut fresh = MemoryStore::new();
        let restored = read.restore_into(&mut fresh).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].name, "Old");
    }

    #[test]
    fn test_other_version_accepted() {
        let json = r#"{"version":"0.9","date":"2023-12-31T23:59:59Z","templates":[]}"#;
        let backup = Backup::from_json(json).unwrap();
        assert_eq!(backup.version, "0.9");
        assert!(backup.templates.is_empty());
    }

    #[test]
    fn test_suggested_filename() {
        let json = r#"{"version":"1.0","date":"2024-03-01T10:00:00Z","templates":[]}"#;
        let backup = Backup::from_json(json).unwrap();
        assert_eq!(
            backup.suggested_filename(),
            "email-templates-backup-2024-03-01T10:00:00.000Z.json"
        );
    }
}
