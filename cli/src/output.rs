//! Output formatting

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Structured data; tables fall back to pretty JSON
    pub fn print<T: Serialize>(&self, data: &T) -> Result<()> {
        match self {
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
            OutputFormat::Json | OutputFormat::Table => {
                println!("{}", serde_json::to_string_pretty(data)?)
            }
        }
        Ok(())
    }

    pub fn print_rows<T: Serialize + Tabled>(&self, rows: &[T]) -> Result<()> {
        match self {
            OutputFormat::Table => {
                println!("{}", Table::new(rows).with(Style::rounded()));
                Ok(())
            }
            _ => self.print(&rows),
        }
    }

    /// Text for tables, structured data otherwise
    pub fn print_text<T: Serialize>(&self, data: &T, text: &str) -> Result<()> {
        match self {
            OutputFormat::Table => {
                println!("{}", text);
                Ok(())
            }
            _ => self.print(data),
        }
    }
}
