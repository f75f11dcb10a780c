//! Hierarchy tree rendering.

use clap::Args;

use workhub_core::error::AppError;
use workhub_core::types::ItemId;
use workhub_entity::item::Item;

use super::App;

/// Arguments for the tree command
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Filter items by substring before rendering
    #[arg(short, long, default_value = "")]
    pub query: String,
}

/// Execute the tree command
pub async fn execute(args: &TreeArgs, env: &str) -> Result<(), AppError> {
    let app = App::load(env).await?;
    let folders = app.folders(&args.query).await?;

    if folders.is_empty() {
        println!("No stages defined.");
        return Ok(());
    }

    for folder in &folders {
        println!("{} [{}]", folder.name, folder.color_tag);

        let items: Vec<&Item> = folder.items.iter().map(|entry| &entry.item).collect();

        // Sub-folders first, then plain root items, like the sidebar shows them.
        let mut top: Vec<&Item> = items
            .iter()
            .copied()
            .filter(|item| item.is_stage_sub_folder)
            .collect();
        top.extend(
            items
                .iter()
                .copied()
                .filter(|item| item.is_root() && !item.is_stage_sub_folder),
        );

        let count = top.len();
        for (index, item) in top.iter().enumerate() {
            render(item, &items, "", index + 1 == count);
        }
        println!();
    }

    Ok(())
}

fn render(item: &Item, items: &[&Item], prefix: &str, last: bool) {
    let branch = if last { "└── " } else { "├── " };
    let mut label = if item.is_stage_sub_folder {
        format!("{}/ (sub)", item.name)
    } else if item.is_folder() {
        format!("{}/", item.name)
    } else {
        item.name.clone()
    };
    if item.is_locked {
        label.push_str(" [locked]");
    }
    println!("{}{}{}", prefix, branch, label);

    let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
    let children = children_of(item.id, items);
    let count = children.len();
    for (index, child) in children.iter().enumerate() {
        render(child, items, &child_prefix, index + 1 == count);
    }
}

fn children_of<'a>(parent: ItemId, items: &[&'a Item]) -> Vec<&'a Item> {
    items
        .iter()
        .copied()
        .filter(|item| item.parent_id == Some(parent))
        .collect()
}
