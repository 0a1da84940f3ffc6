//! Starting configuration for a freshly picked field kind

use super::{
    ChoiceConfig, DateConfig, DropdownConfig, FieldConfig, FieldKind, FileUploadConfig,
    GridConfig, LinearScaleConfig, LongAnswerConfig, RatingConfig, ShortAnswerConfig, TimeConfig,
};
use crate::domain::value_objects::{ChoiceOption, GridTable, InputType, UserInputOption};
use forms_common::IdGenerator;

/// Default config for `kind`, nested ids from the standard generator
pub fn default_config(kind: FieldKind) -> FieldConfig {
    default_config_with(kind, &IdGenerator::new())
}

/// Default config for `kind`, nested ids from `ids`
pub fn default_config_with(kind: FieldKind, ids: &IdGenerator) -> FieldConfig {
    match kind {
        FieldKind::ShortAnswer => FieldConfig::ShortAnswer(ShortAnswerConfig {
            input_type: Some(InputType::Text),
            validation: None,
        }),
        FieldKind::LongAnswer => FieldConfig::LongAnswer(LongAnswerConfig::default()),
        FieldKind::MultipleChoice => FieldConfig::MultipleChoice(first_choice(ids)),
        FieldKind::Checkbox => FieldConfig::Checkbox(first_choice(ids)),
        FieldKind::Dropdown => FieldConfig::Dropdown(DropdownConfig {
            options: vec![ChoiceOption::new(ids.generate(), "Option 1")],
            shuffle: false,
        }),
        FieldKind::LinearScale => FieldConfig::LinearScale(LinearScaleConfig::default()),
        FieldKind::Rating => FieldConfig::Rating(RatingConfig::default()),
        FieldKind::MultipleChoiceGrid => FieldConfig::MultipleChoiceGrid(first_grid(ids)),
        FieldKind::CheckboxGrid => FieldConfig::CheckboxGrid(first_grid(ids)),
        FieldKind::Date => FieldConfig::Date(DateConfig::default()),
        FieldKind::Time => FieldConfig::Time(TimeConfig::default()),
        FieldKind::FileUpload => FieldConfig::FileUpload(FileUploadConfig::default()),
    }
}

fn first_choice(ids: &IdGenerator) -> ChoiceConfig {
    ChoiceConfig {
        options: vec![UserInputOption::new(ids.generate(), "Option 1")],
        shuffle: false,
    }
}

fn first_grid(ids: &IdGenerator) -> GridConfig {
    GridConfig {
        table: GridTable::new(
            vec![ChoiceOption::new(ids.generate(), "Row 1")],
            vec![ChoiceOption::new(ids.generate(), "Column 1")],
        ),
        shuffle: false,
        limit_to_one_per_column: false,
    }
}
