//! Plain-text building blocks shared by the views

use forms_core::{FormField, RatingIcon};

pub const INDENT: &str = "  ";
pub const NOT_IMPLEMENTED: &str = "Field type is not implemented yet.";

/// Lines of rendered text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    lines: Vec<String>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Push with one level of indentation
    pub fn item(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("{}{}", INDENT, line.as_ref()));
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn into_string(self) -> String {
        self.lines.join("\n")
    }
}

/// Title line with a required marker, then the description if any
pub fn question(field: &FormField) -> Block {
    let mut block = Block::new();
    let title = field.title.as_deref().unwrap_or("Untitled Question");
    if field.required {
        block.push(format!("{} *", title));
    } else {
        block.push(title);
    }
    if let Some(description) = field.description.as_deref().filter(|d| !d.is_empty()) {
        block.push(description);
    }
    block
}

pub fn underline(title: &str, mark: char) -> String {
    let rule: String = std::iter::repeat(mark).take(title.chars().count().max(3)).collect();
    format!("{}\n{}", title, rule)
}

/// Filled and empty glyph for a rating icon
pub fn rating_glyphs(icon: RatingIcon) -> (char, char) {
    match icon {
        RatingIcon::Star => ('★', '☆'),
        RatingIcon::Heart => ('♥', '♡'),
        RatingIcon::Like => ('▲', '△'),
    }
}

/// Pad every cell of a grid row to `width`
pub fn grid_row<'a>(head: &str, cells: impl Iterator<Item = &'a str>, width: usize) -> String {
    let mut row = format!("{:<width$}", head, width = width);
    for cell in cells {
        row.push_str(&format!(" {:^width$}", cell, width = width));
    }
    row.trim_end().to_string()
}

/// Human readable byte count
pub fn byte_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
