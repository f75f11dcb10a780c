//! Demonstration snapshot seeding.

use clap::Args;

use workhub_core::config::AppConfig;
use workhub_core::error::AppError;
use workhub_core::types::{ItemId, StageId};
use workhub_entity::item::{Item, NewItem};
use workhub_entity::stage::{NewStage, Stage};
use workhub_store::Snapshot;

use crate::render;

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Overwrite an existing snapshot
    #[arg(short, long)]
    pub force: bool,
}

/// Execute the seed command
pub async fn execute(args: &SeedArgs, env: &str) -> Result<(), AppError> {
    let config = AppConfig::load(env)?;
    let existing = Snapshot::load(&config.data.snapshot_path).await?;

    if !existing.is_empty() {
        if !args.force {
            return Err(AppError::conflict(
                "Snapshot already contains data; re-run with --force to overwrite",
            ));
        }
        render::warning("Overwriting existing snapshot");
    }

    let snapshot = demo_snapshot();
    snapshot.save(&config.data.snapshot_path).await?;

    render::success("Demonstration snapshot written");
    render::detail("Stages", &snapshot.stages.len().to_string());
    render::detail("Items", &snapshot.items.len().to_string());
    render::detail("Path", &config.data.snapshot_path);

    Ok(())
}

/// A small work order board with every item shape represented.
fn demo_snapshot() -> Snapshot {
    let open = Stage::from_new(StageId::new(), NewStage::new("Open", "amber"), 0);
    let in_progress = Stage::from_new(StageId::new(), NewStage::new("In Progress", "blue"), 1);
    let review = Stage::from_new(StageId::new(), NewStage::new("Review", "violet"), 2);
    let done = Stage::from_new(StageId::new(), NewStage::new("Done", "green"), 3);

    let urgent = Item::from_new(ItemId::new(), NewItem::sub_folder("Urgent", open.id));
    let case_a = Item::from_new(
        ItemId::new(),
        NewItem::folder("Case A", open.id, Some(urgent.id)),
    );
    let brief = Item::from_new(
        ItemId::new(),
        NewItem::file("brief.pdf", open.id, Some(case_a.id)),
    );
    let templates = Item::from_new(ItemId::new(), NewItem::folder("Templates", open.id, None));
    let contract = Item::from_new(
        ItemId::new(),
        NewItem::file("contract.docx", open.id, Some(templates.id)),
    );
    let survey = Item::from_new(
        ItemId::new(),
        NewItem::file("site-survey.pdf", in_progress.id, None),
    );
    let checklists = Item::from_new(ItemId::new(), NewItem::folder("Checklists", review.id, None));
    let report = Item::from_new(
        ItemId::new(),
        NewItem::file("closing-report.pdf", done.id, None),
    );
    let mut archive = Item::from_new(ItemId::new(), NewItem::folder("Archive", done.id, None));
    archive.is_locked = true;

    Snapshot::new(
        vec![open, in_progress, review, done],
        vec![
            urgent, case_a, brief, templates, contract, survey, checklists, report, archive,
        ],
    )
}
