//! Shared factories for compute tests: an in-memory database with the schema
//! applied, and seed helpers for projects, categories and amounts.

use chrono::{DateTime, TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use model::entities::{amount, category, project};
use model::error::Result;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};

pub async fn setup_db() -> std::result::Result<DatabaseConnection, DbErr> {
    // Connect to the SQLite database
    let db = Database::connect("sqlite::memory:").await?;

    // Enable foreign keys
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

    // Apply migrations
    Migrator::up(&db, None).await.expect("Migrations failed.");
    Ok(db)
}

pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub async fn new_project(db: &DatabaseConnection) -> Result<project::Model> {
    project::Model::create(db, "Test project", "€").await
}

pub async fn new_category(
    db: &DatabaseConnection,
    project: &project::Model,
    name: &str,
    parent_id: Option<i32>,
) -> Result<category::Model> {
    category::Model::create(db, name, project, parent_id).await
}

pub async fn new_one_off(
    db: &DatabaseConnection,
    project: &project::Model,
    category_id: Option<i32>,
    value: i64,
    gain: bool,
    occurs_at: DateTime<Utc>,
) -> Result<amount::Model> {
    amount::Model::create(
        db,
        project,
        category_id,
        amount::AmountFields {
            value: Decimal::new(value, 0),
            is_gain: gain,
            is_planned: false,
            occurs_at,
            ends_at: None,
            description: "one-off".to_string(),
        },
    )
    .await
}

pub async fn new_planned(
    db: &DatabaseConnection,
    project: &project::Model,
    category_id: Option<i32>,
    value: i64,
    gain: bool,
    occurs_at: DateTime<Utc>,
    ends_at: Option<DateTime<Utc>>,
) -> Result<amount::Model> {
    amount::Model::create(
        db,
        project,
        category_id,
        amount::AmountFields {
            value: Decimal::new(value, 0),
            is_gain: gain,
            is_planned: true,
            occurs_at,
            ends_at,
            description: "planned".to_string(),
        },
    )
    .await
}
