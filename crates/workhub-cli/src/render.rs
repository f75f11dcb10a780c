//! Terminal rendering for command results.
//!
//! Result sets go through [`OutputFormat::render`]; one-line status output
//! goes through the prefix helpers, which write plain lowercase prefixes so
//! the lines stay grep-friendly in scripts.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Renders a result set to stdout in this format.
    pub fn render<T: Serialize + Tabled>(self, rows: &[T]) {
        println!("{}", self.to_text(rows));
    }

    fn to_text<T: Serialize + Tabled>(self, rows: &[T]) -> String {
        match self {
            Self::Table if rows.is_empty() => String::from("nothing to show"),
            Self::Table => Table::new(rows).to_string(),
            Self::Json => {
                serde_json::to_string_pretty(rows).unwrap_or_else(|_| String::from("[]"))
            }
        }
    }
}

/// Prints a completed-action line.
pub fn success(msg: &str) {
    println!("ok: {msg}");
}

/// Prints a non-fatal warning line.
pub fn warning(msg: &str) {
    println!("warning: {msg}");
}

/// Prints a failure line to stderr.
pub fn failure(msg: &str) {
    eprintln!("error: {msg}");
}

/// Prints one labelled detail line with a right-aligned label.
pub fn detail(label: &str, value: &str) {
    println!("{label:>12}  {value}");
}
