//! Kinds command

use crate::output::OutputFormat;
use anyhow::Result;
use forms_core::FieldKind;
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Serialize, Tabled)]
pub struct KindRow {
    #[tabled(rename = "TYPE")]
    pub tag: &'static str,
    #[tabled(rename = "LABEL")]
    pub label: &'static str,
    #[tabled(rename = "OPTIONS")]
    pub options: bool,
    #[tabled(rename = "GRID")]
    pub grid: bool,
}

pub fn rows() -> Vec<KindRow> {
    FieldKind::ALL
        .iter()
        .map(|kind| KindRow {
            tag: kind.as_str(),
            label: kind.label(),
            options: kind.has_options(),
            grid: kind.has_table(),
        })
        .collect()
}

pub fn handle(format: OutputFormat) -> Result<()> {
    format.print_rows(&rows())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rows() {
        let rows = rows();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].tag, "short_answer");
        assert!(rows.iter().filter(|r| r.grid).all(|r| !r.options));
    }
}
