use anyhow::Result;
use common::CategoryTree;
use compute::tree::{CategoryRef, CategoryTreeBuilder};
use model::entities::project;
use sea_orm::{Database, DatabaseConnection};
use tracing::debug;

use crate::config::AppConfig;

pub async fn fetch_tree(
    db: &DatabaseConnection,
    project_id: i32,
    category_id: Option<i32>,
    offset: i32,
) -> Result<CategoryTree> {
    let project = project::Model::fetch(db, project_id).await?;
    let node = match category_id {
        Some(id) => CategoryRef::Id(id),
        None => CategoryRef::Root,
    };
    let window = compute::current_month_window(None, offset);
    debug!("tree window {} .. {}", window.start, window.end);

    Ok(CategoryTreeBuilder::new()
        .build(db, &project, node, &window)
        .await?)
}

/// Prints one level of a project's category tree, every node rolled up over
/// its own subtree, as JSON.
pub async fn show_tree(
    config: &AppConfig,
    project_id: i32,
    category_id: Option<i32>,
    offset: i32,
) -> Result<()> {
    let db = Database::connect(&config.database_url).await?;
    let tree = fetch_tree(&db, project_id, category_id, offset).await?;
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}
