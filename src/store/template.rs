//! Stored template records.

use crate::model::{Document, Section};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A template as held by a [`TemplateStore`](super::TemplateStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Store-assigned id
    pub id: String,

    /// Display name
    pub name: String,

    /// Sections in render order
    pub content: Vec<Section>,

    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Template {
    /// Open this template for editing.
    pub fn to_document(&self) -> Document {
        Document::from_sections(self.name.clone(), self.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_json_shape() {
        let json = r#"{
            "id": "7f1c",
            "name": "Launch",
            "content": [{"id": "1", "type": "spacer", "content": "4rem"}],
            "created_at": "2024-03-01T10:00:00Z"
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.name, "Launch");

        let doc = template.to_document();
        assert_eq!(doc.name, "Launch");
        assert_eq!(doc.sections()[0].content.to_wire(), "4rem");
    }
}
