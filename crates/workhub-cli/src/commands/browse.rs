//! Interactive hierarchy browser.

use clap::Args;
use dialoguer::{Input, Select};

use workhub_core::error::AppError;
use workhub_core::types::ItemId;
use workhub_entity::hierarchy::{Breadcrumb, NavigationCursor, VirtualFolder};
use workhub_entity::item::ItemFilter;
use workhub_service::{MoveTargetRef, breadcrumbs, current_contents, target_within_subtree};

use crate::render;

use super::{App, parse_stage_id};

/// Arguments for the browse command
#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Stage to open initially
    #[arg(short, long)]
    pub stage: Option<String>,
}

/// One selectable action in the browse menu.
enum Action {
    Open(NavigationCursor),
    Descend(ItemId),
    Inspect(ItemId),
    Back,
    Sidebar,
    Jump,
    Search,
    Move,
    Quit,
}

/// Execute the browse command
pub async fn execute(args: &BrowseArgs, env: &str) -> Result<(), AppError> {
    let app = App::load(env).await?;

    let mut cursor = match &args.stage {
        Some(raw) => NavigationCursor::at_stage(parse_stage_id(raw)?),
        None => NavigationCursor::unselected(),
    };
    let mut search = String::new();
    let mut dirty = false;

    loop {
        let folders = app.folders(&search).await?;
        if folders.is_empty() {
            render::warning("No stages defined; run 'workhub seed' first");
            break;
        }

        let action = if cursor.is_selected() {
            let crumbs = breadcrumbs(&folders, &cursor);
            if crumbs.is_empty() {
                render::warning("Current location no longer exists");
                cursor = NavigationCursor::unselected();
                continue;
            }
            location_menu(&folders, &cursor, &crumbs, &search)?
        } else {
            sidebar_menu(&folders, &search)?
        };

        match action {
            Action::Open(target) => cursor = target,
            Action::Descend(id) => cursor.descend(id),
            Action::Inspect(id) => inspect(&folders, id),
            Action::Back => {
                if !cursor.go_back() {
                    cursor = NavigationCursor::unselected();
                }
            }
            Action::Sidebar => cursor = NavigationCursor::unselected(),
            Action::Jump => {
                let crumbs = breadcrumbs(&folders, &cursor);
                let labels: Vec<&str> = crumbs.iter().map(|crumb| crumb.name.as_str()).collect();
                let picked = Select::new()
                    .with_prompt("Jump to")
                    .items(&labels)
                    .default(0)
                    .interact()
                    .map_err(input_error)?;
                cursor = crumbs[picked].target.clone();
            }
            Action::Search => {
                search = Input::new()
                    .with_prompt("Search (empty clears the filter)")
                    .allow_empty(true)
                    .interact_text()
                    .map_err(input_error)?;
            }
            Action::Move => {
                if move_flow(&app, &folders, &cursor).await? {
                    dirty = true;
                }
            }
            Action::Quit => break,
        }
    }

    if dirty {
        app.persist().await?;
        render::success("Snapshot saved");
    }

    Ok(())
}

/// Stage sidebar: stages with their sub-folders indented beneath them.
fn sidebar_menu(folders: &[VirtualFolder], search: &str) -> Result<Action, AppError> {
    let mut labels = Vec::new();
    let mut actions = Vec::new();

    for folder in folders {
        labels.push(format!(
            "{} [{}] ({} items)",
            folder.name,
            folder.color_tag,
            folder.item_count()
        ));
        actions.push(Action::Open(NavigationCursor::at_stage(folder.stage_id)));

        for sub in folder.stage_sub_folders() {
            labels.push(format!("  · {}", sub.name));
            actions.push(Action::Open(NavigationCursor::at_sub_folder(
                folder.stage_id,
                sub.id,
            )));
        }
    }
    labels.push(search_label(search));
    actions.push(Action::Search);
    labels.push("quit".to_string());
    actions.push(Action::Quit);

    let picked = Select::new()
        .with_prompt("Select a stage")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(input_error)?;

    Ok(actions.remove(picked))
}

/// Contents of the current folder plus navigation actions.
fn location_menu(
    folders: &[VirtualFolder],
    cursor: &NavigationCursor,
    crumbs: &[Breadcrumb],
    search: &str,
) -> Result<Action, AppError> {
    let path: Vec<&str> = crumbs.iter().map(|crumb| crumb.name.as_str()).collect();
    println!();
    println!("▸ {}", path.join(" / "));
    if !search.is_empty() {
        println!("  (filtered by '{}')", search);
    }

    let contents = current_contents(folders, cursor);
    let mut labels = Vec::new();
    let mut actions = Vec::new();

    for item in &contents {
        if item.is_folder() {
            labels.push(format!("{}/", item.name));
            actions.push(Action::Descend(item.id));
        } else {
            labels.push(item.name.clone());
            actions.push(Action::Inspect(item.id));
        }
    }
    labels.push(".. (back)".to_string());
    actions.push(Action::Back);
    labels.push("jump to breadcrumb".to_string());
    actions.push(Action::Jump);
    labels.push(search_label(search));
    actions.push(Action::Search);
    labels.push("move an item".to_string());
    actions.push(Action::Move);
    labels.push("stage sidebar".to_string());
    actions.push(Action::Sidebar);
    labels.push("quit".to_string());
    actions.push(Action::Quit);

    let picked = Select::new()
        .with_prompt("Select")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(input_error)?;

    Ok(actions.remove(picked))
}

/// Pick an item from the current folder, then a target outside its subtree.
async fn move_flow(
    app: &App,
    folders: &[VirtualFolder],
    cursor: &NavigationCursor,
) -> Result<bool, AppError> {
    let contents = current_contents(folders, cursor);
    if contents.is_empty() {
        render::warning("Nothing to move here");
        return Ok(false);
    }

    let labels: Vec<&str> = contents.iter().map(|item| item.name.as_str()).collect();
    let picked = Select::new()
        .with_prompt("Move which item?")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(input_error)?;
    let source = contents[picked];

    let all_items = app.items.list_items(&ItemFilter::all()).await?;
    let stages = app.stages.list_stages().await?;

    let mut target_labels = Vec::new();
    let mut targets = Vec::new();
    for stage in &stages {
        target_labels.push(format!("{} (stage root)", stage.name));
        targets.push(MoveTargetRef::Stage(stage.id));
    }
    // Sub-folders cannot be nested, so a sub-folder only gets stage targets.
    if !source.is_stage_sub_folder {
        for folder in folders {
            for sub in folder.stage_sub_folders() {
                if target_within_subtree(&all_items, source.id, sub.id) {
                    continue;
                }
                target_labels.push(format!("{} / {}", folder.name, sub.name));
                targets.push(MoveTargetRef::SubFolder(sub.id));
            }
        }
    }

    let choice = Select::new()
        .with_prompt(format!("Move '{}' to", source.name))
        .items(&target_labels)
        .default(0)
        .interact()
        .map_err(input_error)?;

    match app.items.move_item(source.id, targets[choice]).await {
        Ok(item) => {
            render::success(&format!("Moved '{}'", item.name));
            Ok(true)
        }
        Err(e) => {
            render::failure(&format!("Move failed: {}", e));
            Ok(false)
        }
    }
}

/// Print the details of a single item.
fn inspect(folders: &[VirtualFolder], id: ItemId) {
    let Some(entry) = folders.iter().find_map(|folder| folder.find_item(id)) else {
        return;
    };

    println!();
    render::detail("ID", &entry.item.id.to_string());
    render::detail("Name", &entry.item.name);
    render::detail("Kind", entry.item.kind.as_str());
    render::detail("Location", &entry.folder_path);
    if let Some(size) = entry.item.size_bytes {
        render::detail("Size", &format!("{} bytes", size));
    }
    if let Some(mime) = &entry.item.mime_type {
        render::detail("MIME type", mime);
    }
    if let Some(url) = &entry.item.storage_url {
        render::detail("Blob", url);
    }
    println!();
}

fn search_label(search: &str) -> String {
    if search.is_empty() {
        "search".to_string()
    } else {
        format!("search (current: '{}')", search)
    }
}

fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {}", e))
}
