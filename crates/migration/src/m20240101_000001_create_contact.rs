//! Create `contact` table.
//!
//! Optional contact fields are nullable; `mobile` uniqueness lives in the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(uuid(Contact::Id).primary_key())
                    .col(string_len(Contact::Name, 255).not_null())
                    .col(text_null(Contact::ImageUrl))
                    .col(string_len_null(Contact::Email, 255))
                    .col(string_len(Contact::Mobile, 64).not_null())
                    .col(string_len_null(Contact::Company, 255))
                    .col(string_len_null(Contact::Title, 255))
                    .col(string_len_null(Contact::GroupId, 64))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contact::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contact { Table, Id, Name, ImageUrl, Email, Mobile, Company, Title, GroupId }
