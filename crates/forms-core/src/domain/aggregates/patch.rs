//! Partial updates
//!
//! A patch only touches the attributes it sets. Applying an empty patch is
//! still a change as far as the store is concerned.

use super::{FormField, FormHeader, Section};
use crate::domain::schema::FieldConfig;
use crate::domain::value_objects::FormAnswer;
use serde::{Deserialize, Serialize};

/// Shallow merge into a `FormField`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub image_url: Option<String>,
    pub config: Option<FieldConfig>,
    pub answer: Option<FormAnswer>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Replaces the whole config, never merges variants
    pub fn config(mut self, config: FieldConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn answer(mut self, answer: FormAnswer) -> Self {
        self.answer = Some(answer);
        self
    }

    pub fn apply(self, field: &mut FormField) {
        if let Some(title) = self.title {
            field.title = Some(title);
        }
        if let Some(description) = self.description {
            field.description = Some(description);
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(url) = self.image_url {
            field.image_url = Some(url);
        }
        if let Some(config) = self.config {
            field.config = config;
        }
        if let Some(answer) = self.answer {
            field.answer = Some(answer);
        }
    }
}

/// Shallow merge into a `Section`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionPatch {
    pub title: Option<String>,
    pub field_order: Option<Vec<String>>,
}

impl SectionPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            field_order: None,
        }
    }

    pub fn apply(self, section: &mut Section) {
        if let Some(title) = self.title {
            section.title = title;
        }
        if let Some(order) = self.field_order {
            section.field_order = order;
        }
    }
}

/// Shallow merge into the `FormHeader`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl HeaderPatch {
    pub fn apply(self, header: &mut FormHeader) {
        if let Some(title) = self.title {
            header.title = title;
        }
        if let Some(description) = self.description {
            header.description = Some(description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{DateConfig, FieldConfig};

    #[test]
    fn test_field_patch_is_shallow() {
        let mut field = FormField::new("f1", FieldConfig::Date(DateConfig::default()))
            .described("When?");
        FieldPatch::new().title("Birthday").required(false).apply(&mut field);

        assert_eq!(field.title.as_deref(), Some("Birthday"));
        assert_eq!(field.description.as_deref(), Some("When?"));
        assert!(!field.required);
    }

    #[test]
    fn test_patch_from_json() {
        let patch: FieldPatch = serde_json::from_str(r#"{"imageUrl":"a.png"}"#).unwrap();
        assert_eq!(patch, FieldPatch::new().image_url("a.png"));
    }

    #[test]
    fn test_header_patch() {
        let mut header = FormHeader::new("Survey");
        HeaderPatch {
            title: None,
            description: Some("Tell us".into()),
        }
        .apply(&mut header);
        assert_eq!(header.title, "Survey");
        assert_eq!(header.description.as_deref(), Some("Tell us"));
    }
}
