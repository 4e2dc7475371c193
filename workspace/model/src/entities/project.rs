use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::{debug, info, instrument};

use crate::error::StoreError;
use super::{amount, category};

/// A budgeting project. Each project carries a currency-like display unit and
/// owns a forest of categories plus any amounts not attributed to a category.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Display label for the project's unit (e.g. "€", "pts").
    pub unit: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::category::Entity")]
    Categories,
    #[sea_orm(has_many = "super::amount::Entity")]
    Amounts,
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<amount::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Amounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Looks a project up by id, surfacing a typed error when absent.
    pub async fn fetch(db: &DatabaseConnection, id: i32) -> crate::error::Result<Model> {
        Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(StoreError::ProjectNotFound(id))
    }

    /// Creates a new project.
    #[instrument(skip(db))]
    pub async fn create(db: &DatabaseConnection, name: &str, unit: &str) -> crate::error::Result<Model> {
        let project = ActiveModel {
            name: Set(name.to_string()),
            unit: Set(unit.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("created project id={} name={:?}", project.id, project.name);
        Ok(project)
    }

    /// Full-record edit; the id is immutable.
    #[instrument(skip(db))]
    pub async fn edit(db: &DatabaseConnection, id: i32, name: &str, unit: &str) -> crate::error::Result<Model> {
        let existing = Self::fetch(db, id).await?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.unit = Set(unit.to_string());
        Ok(active.update(db).await?)
    }

    /// Deletes the project together with everything it transitively owns:
    /// first the amounts, then the categories, then the project row itself.
    #[instrument(skip(db), fields(project_id = self.id))]
    pub async fn delete_cascading(self, db: &DatabaseConnection) -> crate::error::Result<()> {
        let amounts = amount::Entity::delete_many()
            .filter(amount::Column::ProjectId.eq(self.id))
            .exec(db)
            .await?;
        let categories = category::Entity::delete_many()
            .filter(category::Column::ProjectId.eq(self.id))
            .exec(db)
            .await?;
        Entity::delete_by_id(self.id).exec(db).await?;

        debug!(
            "deleted project id={} ({} amounts, {} categories)",
            self.id, amounts.rows_affected, categories.rows_affected
        );
        Ok(())
    }
}
