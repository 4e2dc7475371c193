use common::MonthlyTotals;
use model::entities::{amount, project};
use sea_orm::DatabaseConnection;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::monthly;
use crate::window::MonthWindow;

/// Project-wide monthly totals: the root rollup without the per-category
/// breakdown, backing the dashboard gauge.
#[instrument(skip(db, project, window), fields(project_id = project.id))]
pub async fn monthly_totals(
    db: &DatabaseConnection,
    project: &project::Model,
    window: &MonthWindow,
) -> Result<MonthlyTotals> {
    let amounts = amount::Model::for_project(db, project.id).await?;
    debug!("rolling up {} amounts for project {}", amounts.len(), project.id);
    Ok(monthly::totals_for(&amounts, window))
}
