//! CLI command definitions and dispatch.

pub mod browse;
pub mod item;
pub mod search;
pub mod seed;
pub mod stage;
pub mod tree;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use workhub_core::config::AppConfig;
use workhub_core::error::AppError;
use workhub_core::events::EventBus;
use workhub_core::types::{ItemId, StageId};
use workhub_entity::hierarchy::VirtualFolder;
use workhub_entity::item::ItemFilter;
use workhub_service::{ItemService, StageService, build_virtual_folders};
use workhub_store::blob::LocalFileStorage;
use workhub_store::{MemoryItemStore, MemoryStageRegistry, Snapshot};

use crate::render::OutputFormat;

/// WorkHub work order hierarchy manager
#[derive(Debug, Parser)]
#[command(name = "workhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (config/<env>.toml)
    #[arg(short, long, default_value = "local")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Workflow stage management
    Stage(stage::StageArgs),
    /// Work item management
    Item(item::ItemArgs),
    /// Render the full hierarchy as a tree
    Tree(tree::TreeArgs),
    /// Search items across all stages
    Search(search::SearchArgs),
    /// Browse the hierarchy interactively
    Browse(browse::BrowseArgs),
    /// Write a demonstration snapshot
    Seed(seed::SeedArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Stage(args) => stage::execute(args, &self.env, self.format).await,
            Commands::Item(args) => item::execute(args, &self.env, self.format).await,
            Commands::Tree(args) => tree::execute(args, &self.env).await,
            Commands::Search(args) => search::execute(args, &self.env, self.format).await,
            Commands::Browse(args) => browse::execute(args, &self.env).await,
            Commands::Seed(args) => seed::execute(args, &self.env).await,
        }
    }
}

/// Service wiring shared by every command.
///
/// Commands operate on in-memory stores hydrated from the JSON snapshot;
/// mutating commands persist the snapshot back before exiting.
pub struct App {
    pub config: AppConfig,
    pub stages: StageService,
    pub items: ItemService,
}

impl App {
    /// Load configuration and hydrate the stores from the snapshot.
    pub async fn load(env: &str) -> Result<Self, AppError> {
        let config = AppConfig::load(env)?;
        let snapshot = Snapshot::load(&config.data.snapshot_path).await?;

        let bus = EventBus::new();
        let registry = Arc::new(MemoryStageRegistry::with_stages(bus.clone(), snapshot.stages));
        let store = Arc::new(MemoryItemStore::with_items(bus.clone(), snapshot.items));
        let storage = Arc::new(LocalFileStorage::new(&config.data.blob_root).await?);

        Ok(Self {
            stages: StageService::new(registry.clone()),
            items: ItemService::new(store, registry, storage),
            config,
        })
    }

    /// Persist the current store contents back to the snapshot file.
    pub async fn persist(&self) -> Result<(), AppError> {
        let snapshot = Snapshot::new(
            self.stages.list_stages().await?,
            self.items.list_items(&ItemFilter::all()).await?,
        );
        snapshot.save(&self.config.data.snapshot_path).await
    }

    /// Build the derived hierarchy for the current state.
    pub async fn folders(&self, search: &str) -> Result<Vec<VirtualFolder>, AppError> {
        let stages = self.stages.list_stages().await?;
        let items = self.items.list_items(&ItemFilter::all()).await?;
        Ok(build_virtual_folders(&stages, &items, search))
    }
}

/// Helper: parse a stage ID argument
pub fn parse_stage_id(raw: &str) -> Result<StageId, AppError> {
    raw.parse()
        .map_err(|e| AppError::validation(format!("Invalid stage ID '{}': {}", raw, e)))
}

/// Helper: parse an item ID argument
pub fn parse_item_id(raw: &str) -> Result<ItemId, AppError> {
    raw.parse()
        .map_err(|e| AppError::validation(format!("Invalid item ID '{}': {}", raw, e)))
}
