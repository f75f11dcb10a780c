//! Work item management commands.

use std::path::PathBuf;

use bytes::Bytes;
use clap::{Args, Subcommand};

use workhub_core::error::AppError;
use workhub_service::MoveTargetRef;

use crate::render::{self, OutputFormat};

use super::{App, parse_item_id, parse_stage_id};

/// Arguments for item commands
#[derive(Debug, Args)]
pub struct ItemArgs {
    /// Item subcommand
    #[command(subcommand)]
    pub command: ItemCommand,
}

/// Item subcommands
#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Create a stage sub-folder (shown in the sidebar under its stage)
    Create {
        /// Sub-folder name
        name: String,
        /// Stage ID
        #[arg(short, long)]
        stage: String,
    },
    /// Create a folder
    Mkdir {
        /// Folder name
        name: String,
        /// Stage ID
        #[arg(short, long)]
        stage: String,
        /// Parent folder ID (omit for stage root)
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Upload a file from disk
    Upload {
        /// Path to the file to upload
        file: PathBuf,
        /// Stage ID
        #[arg(short, long)]
        stage: String,
        /// Parent folder ID (omit for stage root)
        #[arg(short, long)]
        parent: Option<String>,
        /// Override file name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Rename an item
    Rename {
        /// Item ID
        id: String,
        /// New name
        name: String,
    },
    /// Move an item onto a stage root or into a stage sub-folder
    Move {
        /// Item ID
        id: String,
        /// Target stage ID (item lands at the stage root)
        #[arg(long, conflicts_with = "to_sub")]
        to_stage: Option<String>,
        /// Target stage sub-folder ID
        #[arg(long)]
        to_sub: Option<String>,
    },
    /// Lock a folder against deletion
    Lock {
        /// Item ID
        id: String,
    },
    /// Unlock a folder
    Unlock {
        /// Item ID
        id: String,
    },
    /// Delete an item and all of its descendants
    Delete {
        /// Item ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute item commands
pub async fn execute(args: &ItemArgs, env: &str, _format: OutputFormat) -> Result<(), AppError> {
    let app = App::load(env).await?;

    match &args.command {
        ItemCommand::Create { name, stage } => {
            let sub_folder = app
                .items
                .create_sub_folder(name, parse_stage_id(stage)?)
                .await?;
            app.persist().await?;

            render::success(&format!(
                "Sub-folder '{}' created (id: {})",
                sub_folder.name, sub_folder.id
            ));
        }
        ItemCommand::Mkdir {
            name,
            stage,
            parent,
        } => {
            let parent_id = parent.as_deref().map(parse_item_id).transpose()?;
            let folder = app
                .items
                .create_folder(name, parse_stage_id(stage)?, parent_id)
                .await?;
            app.persist().await?;

            render::success(&format!("Folder '{}' created (id: {})", folder.name, folder.id));
        }
        ItemCommand::Upload {
            file,
            stage,
            parent,
            name,
        } => {
            if !file.exists() {
                return Err(AppError::not_found(format!(
                    "File not found: {}",
                    file.display()
                )));
            }

            let file_name = name.clone().unwrap_or_else(|| {
                file.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("upload")
                    .to_string()
            });

            let content = tokio::fs::read(file)
                .await
                .map_err(|e| AppError::storage(format!("Failed to read file: {}", e)))?;
            let size = content.len();

            let mime = mime_guess::from_path(&file_name)
                .first_or_octet_stream()
                .to_string();

            let parent_id = parent.as_deref().map(parse_item_id).transpose()?;
            let item = app
                .items
                .upload_file(
                    &file_name,
                    parse_stage_id(stage)?,
                    parent_id,
                    Bytes::from(content),
                    Some(&mime),
                )
                .await?;
            app.persist().await?;

            render::success(&format!(
                "File '{}' uploaded (id: {}, size: {} bytes)",
                item.name, item.id, size
            ));
        }
        ItemCommand::Rename { id, name } => {
            let item = app.items.rename_item(parse_item_id(id)?, name).await?;
            app.persist().await?;

            render::success(&format!("Item renamed to '{}'", item.name));
        }
        ItemCommand::Move { id, to_stage, to_sub } => {
            let target = match (to_stage, to_sub) {
                (Some(stage), None) => MoveTargetRef::Stage(parse_stage_id(stage)?),
                (None, Some(sub)) => MoveTargetRef::SubFolder(parse_item_id(sub)?),
                _ => {
                    return Err(AppError::validation(
                        "Exactly one of --to-stage or --to-sub is required",
                    ));
                }
            };

            let item = app.items.move_item(parse_item_id(id)?, target).await?;
            app.persist().await?;

            render::success(&format!("Item '{}' moved", item.name));
        }
        ItemCommand::Lock { id } => {
            let item = app.items.set_locked(parse_item_id(id)?, true).await?;
            app.persist().await?;

            render::success(&format!("Folder '{}' locked", item.name));
        }
        ItemCommand::Unlock { id } => {
            let item = app.items.set_locked(parse_item_id(id)?, false).await?;
            app.persist().await?;

            render::success(&format!("Folder '{}' unlocked", item.name));
        }
        ItemCommand::Delete { id, yes } => {
            let item_id = parse_item_id(id)?;
            let item = app.items.get_item(item_id).await?;

            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete '{}' and all of its descendants?",
                        item.name
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    render::warning("Aborted");
                    return Ok(());
                }
            }

            let removed = app.items.delete_item(item_id).await?;
            app.persist().await?;

            render::success(&format!(
                "Deleted '{}' ({} descendants)",
                item.name,
                removed.len().saturating_sub(1)
            ));
        }
    }

    Ok(())
}
