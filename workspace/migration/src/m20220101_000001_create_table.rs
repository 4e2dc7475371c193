use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create projects table
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(pk_auto(Projects::Id))
                    .col(string(Projects::Name))
                    .col(string(Projects::Unit))
                    .to_owned(),
            )
            .await?;

        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(string(Categories::Name))
                    .col(integer(Categories::ProjectId))
                    .col(integer_null(Categories::ParentId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_project")
                            .from(Categories::Table, Categories::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_parent")
                            .from(Categories::Table, Categories::ParentId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create amounts table
        manager
            .create_table(
                Table::create()
                    .table(Amounts::Table)
                    .if_not_exists()
                    .col(pk_auto(Amounts::Id))
                    .col(decimal_len(Amounts::Value, 16, 4))
                    .col(boolean(Amounts::IsGain))
                    .col(boolean(Amounts::IsPlanned))
                    .col(timestamp_with_time_zone(Amounts::OccursAt))
                    .col(timestamp_with_time_zone_null(Amounts::EndsAt))
                    .col(string(Amounts::Description))
                    .col(integer(Amounts::ProjectId))
                    .col(integer_null(Amounts::CategoryId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_amount_project")
                            .from(Amounts::Table, Amounts::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_amount_category")
                            .from(Amounts::Table, Amounts::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        manager
            .drop_table(Table::drop().table(Amounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Name,
    Unit,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    ProjectId,
    ParentId,
}

#[derive(DeriveIden)]
enum Amounts {
    Table,
    Id,
    Value,
    IsGain,
    IsPlanned,
    OccursAt,
    EndsAt,
    Description,
    ProjectId,
    CategoryId,
}
