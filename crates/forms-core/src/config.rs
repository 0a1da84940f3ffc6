//! Store configuration

use forms_common::{FormsError, FormsResult, IdGenerator};
use serde::{Deserialize, Serialize};

/// Knobs for a `FormStore`
///
/// Every key is optional when deserialized; missing keys take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Route `reorder_fields` through the permutation check
    pub strict_ordering: bool,
    /// Length of generated short ids
    pub id_length: usize,
    /// Title of a new document
    pub default_form_title: String,
    /// Description of a new document
    pub default_form_description: Option<String>,
    /// Title of the section every new document starts with
    pub default_section_title: String,
}

impl StoreConfig {
    pub const MIN_ID_LENGTH: usize = 4;
    pub const MAX_ID_LENGTH: usize = 32;

    pub fn validate(&self) -> FormsResult<()> {
        if !(Self::MIN_ID_LENGTH..=Self::MAX_ID_LENGTH).contains(&self.id_length) {
            return Err(FormsError::ConfigError(format!(
                "id_length must be between {} and {}, got {}",
                Self::MIN_ID_LENGTH,
                Self::MAX_ID_LENGTH,
                self.id_length
            )));
        }
        if self.default_section_title.trim().is_empty() {
            return Err(FormsError::ConfigError(
                "default_section_title cannot be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn id_generator(&self) -> IdGenerator {
        IdGenerator::with_length(self.id_length)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            strict_ordering: false,
            id_length: IdGenerator::DEFAULT_LENGTH,
            default_form_title: "Untitled Form".into(),
            default_form_description: Some("Form Description".into()),
            default_section_title: "Section 1".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.id_generator().length(), 8);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{"strict_ordering":true}"#).unwrap();
        assert!(config.strict_ordering);
        assert_eq!(config.default_form_title, "Untitled Form");
    }

    #[test]
    fn test_rejects_tiny_ids() {
        let config = StoreConfig {
            id_length: 2,
            ..StoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(FormsError::ConfigError(_))));
    }
}
