//! Workflow stage management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use workhub_core::error::AppError;
use workhub_core::types::StageId;
use workhub_entity::stage::NewStage;

use crate::render::{self, OutputFormat};

use super::{App, parse_stage_id};

/// Arguments for stage commands
#[derive(Debug, Args)]
pub struct StageArgs {
    /// Stage subcommand
    #[command(subcommand)]
    pub command: StageCommand,
}

/// Stage subcommands
#[derive(Debug, Subcommand)]
pub enum StageCommand {
    /// List stages in display order
    List,
    /// Create a new stage
    Create {
        /// Stage name
        name: String,
        /// Color tag shown in listings
        #[arg(short, long, default_value = "slate")]
        color: String,
    },
    /// Rename a stage
    Rename {
        /// Stage ID
        id: String,
        /// New name
        name: String,
    },
    /// Change a stage's color tag
    Recolor {
        /// Stage ID
        id: String,
        /// New color tag
        color: String,
    },
    /// Reorder stages (every stage ID exactly once)
    Reorder {
        /// Stage IDs in the desired order
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Delete a stage (its items become orphans)
    Delete {
        /// Stage ID
        id: String,
    },
}

/// Stage display row
#[derive(Debug, Serialize, Tabled)]
struct StageRow {
    /// Stage ID
    id: String,
    /// Name
    name: String,
    /// Color tag
    color: String,
    /// Display position
    position: i32,
    /// Created at
    created_at: String,
}

/// Execute stage commands
pub async fn execute(args: &StageArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let app = App::load(env).await?;

    match &args.command {
        StageCommand::List => {
            let stages = app.stages.list_stages().await?;

            let rows: Vec<StageRow> = stages
                .iter()
                .map(|stage| StageRow {
                    id: stage.id.to_string(),
                    name: stage.name.clone(),
                    color: stage.color_tag.clone(),
                    position: stage.order_position,
                    created_at: stage.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            format.render(&rows);
        }
        StageCommand::Create { name, color } => {
            let stage = app
                .stages
                .create_stage(NewStage::new(name.as_str(), color.as_str()))
                .await?;
            app.persist().await?;

            render::success(&format!("Stage '{}' created (id: {})", stage.name, stage.id));
        }
        StageCommand::Rename { id, name } => {
            let stage = app.stages.rename_stage(parse_stage_id(id)?, name).await?;
            app.persist().await?;

            render::success(&format!("Stage renamed to '{}'", stage.name));
        }
        StageCommand::Recolor { id, color } => {
            let stage = app.stages.recolor_stage(parse_stage_id(id)?, color).await?;
            app.persist().await?;

            render::success(&format!(
                "Stage '{}' recolored to '{}'",
                stage.name, stage.color_tag
            ));
        }
        StageCommand::Reorder { ids } => {
            let order: Vec<StageId> = ids
                .iter()
                .map(|raw| parse_stage_id(raw))
                .collect::<Result<_, _>>()?;

            app.stages.reorder_stages(&order).await?;
            app.persist().await?;

            render::success(&format!("Reordered {} stages", order.len()));
        }
        StageCommand::Delete { id } => {
            let stage = app.stages.delete_stage(parse_stage_id(id)?).await?;
            app.persist().await?;

            render::success(&format!("Stage '{}' deleted", stage.name));
        }
    }

    Ok(())
}
