//! Cross-stage item search.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use workhub_core::error::AppError;

use crate::render::OutputFormat;

use super::App;

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Substring to match against item names (case-insensitive)
    pub query: String,
}

/// Search result row
#[derive(Debug, Serialize, Tabled)]
struct SearchRow {
    /// Item ID
    id: String,
    /// Name
    name: String,
    /// Kind
    kind: String,
    /// Stage or stage/sub-folder location
    location: String,
    /// Size in bytes (empty for folders)
    size: String,
}

/// Execute the search command
pub async fn execute(args: &SearchArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let app = App::load(env).await?;
    let folders = app.folders(&args.query).await?;

    let rows: Vec<SearchRow> = folders
        .iter()
        .flat_map(|folder| folder.items.iter())
        .map(|entry| SearchRow {
            id: entry.item.id.to_string(),
            name: entry.item.name.clone(),
            kind: entry.item.kind.to_string(),
            location: entry.folder_path.clone(),
            size: entry
                .item
                .size_bytes
                .map(|n| n.to_string())
                .unwrap_or_default(),
        })
        .collect();

    format.render(&rows);

    Ok(())
}
