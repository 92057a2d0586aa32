use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Contact: one record per mobile
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_contact_mobile")
                    .table(Contact::Table)
                    .col(Contact::Mobile)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_contact_mobile").table(Contact::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Contact { Table, Mobile }
