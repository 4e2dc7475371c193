use anyhow::Result;
use common::MonthlyTotals;
use model::entities::project;
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;

/// What the `totals` command prints: the project header plus the rollup for
/// the requested month.
#[derive(Debug, Serialize)]
pub struct TotalsReport {
    pub project: String,
    pub unit: String,
    #[serde(flatten)]
    pub totals: MonthlyTotals,
}

pub async fn fetch_totals(
    db: &DatabaseConnection,
    project_id: i32,
    offset: i32,
) -> Result<TotalsReport> {
    let project = project::Model::fetch(db, project_id).await?;
    let window = compute::current_month_window(None, offset);
    debug!("totals window {} .. {}", window.start, window.end);

    let totals = compute::totals::monthly_totals(db, &project, &window).await?;
    Ok(TotalsReport {
        project: project.name,
        unit: project.unit,
        totals,
    })
}

/// Prints a project's monthly totals for the given offset as JSON.
pub async fn show_totals(config: &AppConfig, project_id: i32, offset: i32) -> Result<()> {
    let db = Database::connect(&config.database_url).await?;
    let report = fetch_totals(&db, project_id, offset).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
