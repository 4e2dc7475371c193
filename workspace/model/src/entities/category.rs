use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, QueryOrder, Set};
use tracing::{debug, instrument, trace};

use crate::error::StoreError;
use super::{amount, project};

/// Represents a category for amounts.
/// Categories form a forest per project (e.g. "Food" -> "Groceries"); a
/// category without a parent sits directly under the project root.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// The owning project.
    pub project_id: i32,
    /// Self-referencing foreign key for hierarchical categories.
    pub parent_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
    /// Defines the self-referencing relationship for parent category.
    #[sea_orm(belongs_to = "Entity", from = "Column::ParentId", to = "Column::Id")]
    Parent,
}

impl Related<project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Looks a category up by id, surfacing a typed error when absent.
    pub async fn fetch(db: &DatabaseConnection, id: i32) -> crate::error::Result<Model> {
        Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(StoreError::CategoryNotFound(id))
    }

    /// Gets all direct children of this category, in insertion order.
    pub async fn direct_children(&self, db: &DatabaseConnection) -> crate::error::Result<Vec<Model>> {
        Ok(Entity::find()
            .filter(Column::ParentId.eq(self.id))
            .order_by_asc(Column::Id)
            .all(db)
            .await?)
    }

    /// Gets the top-level categories of a project, i.e. the direct children
    /// of the implicit project root, in insertion order.
    pub async fn top_level(db: &DatabaseConnection, project_id: i32) -> crate::error::Result<Vec<Model>> {
        Ok(Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::ParentId.is_null())
            .order_by_asc(Column::Id)
            .all(db)
            .await?)
    }

    /// Collects the ids of this category and every descendant, level by
    /// level, until the frontier is exhausted.
    pub async fn subtree_ids(&self, db: &DatabaseConnection) -> crate::error::Result<Vec<i32>> {
        let mut ids = vec![self.id];
        let mut frontier = vec![self.id];

        while !frontier.is_empty() {
            let next: Vec<i32> = Entity::find()
                .filter(Column::ParentId.is_in(frontier))
                .all(db)
                .await?
                .into_iter()
                .map(|c| c.id)
                .collect();
            trace!("subtree walk found {} children below category {}", next.len(), self.id);
            ids.extend(&next);
            frontier = next;
        }

        Ok(ids)
    }

    /// Creates a category under the given project, optionally beneath an
    /// existing parent category of the same project. Attaching only under a
    /// pre-existing node is what keeps the forest acyclic.
    #[instrument(skip(db, project), fields(project_id = project.id))]
    pub async fn create(
        db: &DatabaseConnection,
        name: &str,
        project: &project::Model,
        parent_id: Option<i32>,
    ) -> crate::error::Result<Model> {
        if let Some(parent_id) = parent_id {
            match Entity::find_by_id(parent_id).one(db).await? {
                Some(parent) if parent.project_id == project.id => {}
                Some(parent) => {
                    return Err(StoreError::InvalidReference(format!(
                        "parent category {} belongs to project {}, not {}",
                        parent_id, parent.project_id, project.id
                    )));
                }
                None => {
                    return Err(StoreError::InvalidReference(format!(
                        "parent category {parent_id} does not exist"
                    )));
                }
            }
        }

        let category = ActiveModel {
            name: Set(name.to_string()),
            project_id: Set(project.id),
            parent_id: Set(parent_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        debug!("created category id={} under parent {:?}", category.id, category.parent_id);
        Ok(category)
    }

    /// Edits a category. Only the name is editable; the id and the position
    /// in the tree are fixed at creation.
    #[instrument(skip(db))]
    pub async fn rename(db: &DatabaseConnection, id: i32, name: &str) -> crate::error::Result<Model> {
        let existing = Self::fetch(db, id).await?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(name.to_string());
        Ok(active.update(db).await?)
    }

    /// Deletes this category, every descendant category, and all amounts
    /// attributed to any of them.
    #[instrument(skip(db), fields(category_id = self.id))]
    pub async fn delete_subtree(self, db: &DatabaseConnection) -> crate::error::Result<()> {
        let ids = self.subtree_ids(db).await?;

        let amounts = amount::Entity::delete_many()
            .filter(amount::Column::CategoryId.is_in(ids.clone()))
            .exec(db)
            .await?;
        let categories = Entity::delete_many()
            .filter(Column::Id.is_in(ids))
            .exec(db)
            .await?;

        debug!(
            "deleted category subtree rooted at {} ({} categories, {} amounts)",
            self.id, categories.rows_affected, amounts.rows_affected
        );
        Ok(())
    }
}
