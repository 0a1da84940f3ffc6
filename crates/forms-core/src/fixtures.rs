//! Demo document
//!
//! One field of every kind, all in one section. Used by the CLI and by tests
//! that need a populated document.

use crate::domain::{
    ChoiceConfig, ChoiceOption, DateConfig, DropdownConfig, FieldConfig, FileUploadConfig,
    FormDocument, FormField, FormHeader, GridConfig, GridTable, LinearScaleConfig,
    LongAnswerConfig, RatingConfig, RatingIcon, ScaleStart, Section, ShortAnswerConfig,
    TimeConfig, TimeKind, UserInputOption,
};

pub const SEED_DOCUMENT_ID: &str = "nanogram-feedback-form";
pub const SEED_SECTION_ID: &str = "main";

fn choice_options() -> Vec<UserInputOption> {
    vec![
        UserInputOption::new("0", "Option 1"),
        UserInputOption::new("1", "Option 2"),
        UserInputOption::new("2", "Option 3"),
        UserInputOption::other("3", "Other"),
    ]
}

fn plain_options() -> Vec<ChoiceOption> {
    (0..3)
        .map(|i| ChoiceOption::new(i.to_string(), format!("Option {}", i + 1)))
        .collect()
}

fn grid(shuffle: bool, limit_to_one_per_column: bool) -> GridConfig {
    GridConfig {
        table: GridTable::new(plain_options(), plain_options()),
        shuffle,
        limit_to_one_per_column,
    }
}

/// The feedback form used for demos
pub fn seed_document() -> FormDocument {
    let fields = vec![
        ("Short Answer", true, FieldConfig::ShortAnswer(ShortAnswerConfig::default())),
        ("Long Answer", false, FieldConfig::LongAnswer(LongAnswerConfig::default())),
        (
            "Multiple Choice",
            true,
            FieldConfig::MultipleChoice(ChoiceConfig {
                options: choice_options(),
                shuffle: false,
            }),
        ),
        (
            "Checkbox",
            true,
            FieldConfig::Checkbox(ChoiceConfig {
                options: choice_options(),
                shuffle: false,
            }),
        ),
        (
            "Dropdown",
            true,
            FieldConfig::Dropdown(DropdownConfig {
                options: plain_options(),
                shuffle: true,
            }),
        ),
        (
            "Linear Scale",
            true,
            FieldConfig::LinearScale(LinearScaleConfig {
                start: ScaleStart::One,
                count: 5,
                ..LinearScaleConfig::default()
            }),
        ),
        (
            "Rating",
            true,
            FieldConfig::Rating(RatingConfig {
                icon: RatingIcon::Star,
                stroke: "orange".into(),
                fill: "gold".into(),
                count: 5,
            }),
        ),
        ("Multiple Choice Grid", true, FieldConfig::MultipleChoiceGrid(grid(false, false))),
        ("Checkbox Grid", true, FieldConfig::CheckboxGrid(grid(true, true))),
        ("Date", true, FieldConfig::Date(DateConfig { include_time: true })),
        (
            "Time",
            true,
            FieldConfig::Time(TimeConfig {
                kind: TimeKind::Duration,
            }),
        ),
        (
            "File Upload",
            true,
            FieldConfig::FileUpload(FileUploadConfig {
                accepted_file_types: vec![
                    "image/jpeg".into(),
                    "image/png".into(),
                    "image/gif".into(),
                ],
                max_file_size: Some(5_000_000),
            }),
        ),
    ];

    let header = FormHeader::new("Nanogram Feedback Form").with_description(
        "We constantly want to make nanogram a better club for everyone. \
         We would like to know your opinion.",
    );
    let mut doc = FormDocument::new(SEED_DOCUMENT_ID, header);
    let mut order = Vec::with_capacity(fields.len());

    for (i, (title, required, config)) in fields.into_iter().enumerate() {
        let id = i.to_string();
        let mut field = FormField::new(id.clone(), config)
            .titled(title)
            .described(format!("{} description", sentence_case(title)));
        field.required = required;
        doc = doc.with_field(field);
        order.push(id);
    }

    doc.with_section(Section::new(SEED_SECTION_ID, "Section 1").with_order(order))
}

/// "Multiple Choice Grid" -> "Multiple choice grid"
fn sentence_case(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for (i, c) in title.chars().enumerate() {
        if i == 0 {
            out.push(c);
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
