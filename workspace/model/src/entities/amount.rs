use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, QueryOrder, Set};
use tracing::{debug, instrument};

use crate::error::StoreError;
use super::{category, project};

/// A single transaction ("amount") owned by a project, either directly or
/// through exactly one category.
///
/// One-off amounts count for the calendar month containing `occurs_at`.
/// Planned amounts repeat every calendar month from `occurs_at` until the
/// month containing `ends_at` (inclusive), or indefinitely when `ends_at` is
/// `None`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "amounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Magnitude of the transaction, always at least one unit.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub value: Decimal,
    /// true = income ("gain"), false = expense ("used").
    pub is_gain: bool,
    /// true = recurs monthly ("planned"), false = one-off.
    pub is_planned: bool,
    /// One-off: the instant counted. Planned: start of the recurrence.
    pub occurs_at: DateTimeUtc,
    /// Last month the recurrence applies to (inclusive); None = open-ended.
    /// Only meaningful on planned amounts.
    pub ends_at: Option<DateTimeUtc>,
    pub description: String,
    /// The owning project.
    pub project_id: i32,
    /// The category this amount is attributed to; None attributes it
    /// directly to the project root.
    pub category_id: Option<i32>,
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
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Field set shared by create and edit. Ownership (project and category) is
/// fixed at creation and not part of an edit.
#[derive(Clone, Debug)]
pub struct AmountFields {
    pub value: Decimal,
    pub is_gain: bool,
    pub is_planned: bool,
    pub occurs_at: DateTimeUtc,
    pub ends_at: Option<DateTimeUtc>,
    pub description: String,
}

impl AmountFields {
    fn validate(&self) -> crate::error::Result<()> {
        if self.value < Decimal::ONE {
            return Err(StoreError::InvalidValue(self.value));
        }
        Ok(())
    }

    /// An end date on a one-off amount has no meaning; it is dropped rather
    /// than stored.
    fn effective_ends_at(&self) -> Option<DateTimeUtc> {
        if self.is_planned { self.ends_at } else { None }
    }
}

impl Model {
    /// Looks an amount up by id, surfacing a typed error when absent.
    pub async fn fetch(db: &DatabaseConnection, id: i32) -> crate::error::Result<Model> {
        Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(StoreError::AmountNotFound(id))
    }

    /// Every amount owned by the project, directly or via any category.
    pub async fn for_project(db: &DatabaseConnection, project_id: i32) -> crate::error::Result<Vec<Model>> {
        Ok(Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await?)
    }

    /// Amounts attributed directly to the project root (no category).
    pub async fn for_project_root(db: &DatabaseConnection, project_id: i32) -> crate::error::Result<Vec<Model>> {
        Ok(Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::CategoryId.is_null())
            .order_by_asc(Column::Id)
            .all(db)
            .await?)
    }

    /// Amounts attributed directly to the given category, descendants
    /// excluded.
    pub async fn for_category(db: &DatabaseConnection, category_id: i32) -> crate::error::Result<Vec<Model>> {
        Ok(Entity::find()
            .filter(Column::CategoryId.eq(category_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await?)
    }

    /// Amounts attributed to the given category or any descendant category.
    pub async fn for_category_subtree(
        db: &DatabaseConnection,
        category: &category::Model,
    ) -> crate::error::Result<Vec<Model>> {
        let ids = category.subtree_ids(db).await?;
        Ok(Entity::find()
            .filter(Column::CategoryId.is_in(ids))
            .order_by_asc(Column::Id)
            .all(db)
            .await?)
    }

    /// Project amounts whose `occurs_at` falls inside the half-open range
    /// `[start, end)`. Planned amounts outside the range are not included;
    /// recurrence expansion is the compute layer's concern.
    pub async fn for_project_in_range(
        db: &DatabaseConnection,
        project_id: i32,
        start: DateTimeUtc,
        end: DateTimeUtc,
    ) -> crate::error::Result<Vec<Model>> {
        Ok(Entity::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::OccursAt.gte(start))
            .filter(Column::OccursAt.lt(end))
            .order_by_asc(Column::Id)
            .all(db)
            .await?)
    }

    /// Creates an amount under the given project, optionally attributed to an
    /// existing category of the same project.
    #[instrument(skip_all, fields(project_id = project.id, category_id = category_id))]
    pub async fn create(
        db: &DatabaseConnection,
        project: &project::Model,
        category_id: Option<i32>,
        fields: AmountFields,
    ) -> crate::error::Result<Model> {
        fields.validate()?;

        if let Some(category_id) = category_id {
            match category::Entity::find_by_id(category_id).one(db).await? {
                Some(cat) if cat.project_id == project.id => {}
                Some(cat) => {
                    return Err(StoreError::InvalidReference(format!(
                        "category {} belongs to project {}, not {}",
                        category_id, cat.project_id, project.id
                    )));
                }
                None => {
                    return Err(StoreError::InvalidReference(format!(
                        "category {category_id} does not exist"
                    )));
                }
            }
        }

        let amount = ActiveModel {
            value: Set(fields.value),
            is_gain: Set(fields.is_gain),
            is_planned: Set(fields.is_planned),
            occurs_at: Set(fields.occurs_at),
            ends_at: Set(fields.effective_ends_at()),
            description: Set(fields.description.clone()),
            project_id: Set(project.id),
            category_id: Set(category_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        debug!("created amount id={} value={}", amount.id, amount.value);
        Ok(amount)
    }

    /// Full-record edit; the id, project and category are immutable. Moving
    /// an amount is delete + create.
    #[instrument(skip_all, fields(id = id))]
    pub async fn edit(db: &DatabaseConnection, id: i32, fields: AmountFields) -> crate::error::Result<Model> {
        fields.validate()?;
        let existing = Self::fetch(db, id).await?;

        let mut active: ActiveModel = existing.into();
        active.value = Set(fields.value);
        active.is_gain = Set(fields.is_gain);
        active.is_planned = Set(fields.is_planned);
        active.occurs_at = Set(fields.occurs_at);
        active.ends_at = Set(fields.effective_ends_at());
        active.description = Set(fields.description.clone());
        Ok(active.update(db).await?)
    }

    /// Deletes a single amount.
    #[instrument(skip(db))]
    pub async fn delete(db: &DatabaseConnection, id: i32) -> crate::error::Result<()> {
        let result = Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::AmountNotFound(id));
        }
        Ok(())
    }
}
