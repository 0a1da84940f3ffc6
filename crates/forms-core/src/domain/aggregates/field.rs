//! Form Field Entity

use crate::domain::schema::{default_config_with, FieldConfig, FieldKind};
use crate::domain::value_objects::FormAnswer;
use forms_common::IdGenerator;
use serde::{Deserialize, Serialize};

fn default_required() -> bool {
    true
}

/// One question of a form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub config: FieldConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<FormAnswer>,
}

impl FormField {
    pub fn new(id: impl Into<String>, config: FieldConfig) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            required: true,
            image_url: None,
            config,
            answer: None,
        }
    }

    /// Fresh field of `kind` with generated ids and the default config
    pub fn of_kind(kind: FieldKind, ids: &IdGenerator) -> Self {
        Self::new(ids.generate(), default_config_with(kind, ids))
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn kind(&self) -> Option<FieldKind> {
        self.config.kind()
    }

    /// Copy with a new id and new nested option/row/column ids.
    ///
    /// The answer is not carried over since its keys name the old ids.
    pub fn fresh_copy(&self, ids: &IdGenerator) -> Self {
        let mut copy = self.clone();
        copy.id = ids.generate();
        copy.config.refresh_ids(ids);
        copy.answer = None;
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_defaults_to_true() {
        let field: FormField =
            serde_json::from_str(r#"{"id":"f1","config":{"type":"date"}}"#).unwrap();
        assert!(field.required);
        assert_eq!(field.kind(), Some(FieldKind::Date));
    }

    #[test]
    fn test_fresh_copy_never_aliases() {
        let ids = IdGenerator::new();
        let original = FormField::of_kind(FieldKind::MultipleChoice, &ids).titled("Colour");
        let copy = original.fresh_copy(&ids);

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.title, original.title);
        for (a, b) in copy.config.nested_ids().iter().zip(original.config.nested_ids()) {
            assert_ne!(*a, b);
        }
    }

    #[test]
    fn test_fresh_copy_drops_answer() {
        let ids = IdGenerator::new();
        let mut original = FormField::of_kind(FieldKind::Checkbox, &ids);
        let option_id = original.config.nested_ids()[0].to_string();
        original.answer = Some(FormAnswer::choice(option_id));

        let copy = original.fresh_copy(&ids);
        assert!(copy.answer.is_none());
        assert!(original.answer.is_some());
    }
}
