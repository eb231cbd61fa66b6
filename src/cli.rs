use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Juice & smoothie sales dashboard for CSV exports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the dataset's columns and the role each binds by default
    Columns(ColumnsArgs),
    /// Preview the first few rows of the dataset in a formatted table
    Preview(PreviewArgs),
    /// Total sales per category, highest first
    Category(ViewArgs),
    /// Daily total sales over time, with the overall trend
    Daily(ViewArgs),
    /// Distribution of service satisfaction ratings
    Ratings(ViewArgs),
    /// Full dashboard: preview plus all three views, or a JSON summary
    Report(ReportArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input CSV file exported from the sales spreadsheet
    #[arg(short = 'i', long = "input", default_value = "ejb.csv")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

/// Column overrides for the four dashboard roles. Every role defaults to
/// its conventional column name when the dataset has it, else the first
/// column.
#[derive(Debug, Args)]
pub struct MappingArgs {
    /// Column holding the product category
    #[arg(long = "category-column")]
    pub category: Option<String>,
    /// Column holding the sales amount in dollars
    #[arg(long = "sales-column")]
    pub sales: Option<String>,
    /// Column holding the order date
    #[arg(long = "date-column")]
    pub date: Option<String>,
    /// Column holding the service satisfaction rating
    #[arg(long = "satisfaction-column")]
    pub satisfaction: Option<String>,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub mapping: MappingArgs,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub mapping: MappingArgs,
    /// Number of preview rows at the top of the report
    #[arg(long, default_value_t = 5)]
    pub rows: usize,
    /// Emit the dashboard summary as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "comma" | "," => Ok(b','),
        "tab" | "\t" => Ok(b'\t'),
        "semicolon" | ";" => Ok(b';'),
        "pipe" | "|" => Ok(b'|'),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii() => Ok(ch as u8),
                (Some(_), None) => Err("Delimiter must be ASCII".to_string()),
                (Some(_), Some(_)) => Err("Delimiter must be a single character".to_string()),
                (None, _) => Err("Delimiter cannot be empty".to_string()),
            }
        }
    }
}
