use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Boards::Table)
                    .if_not_exists()
                    .col(pk_uuid(Boards::Id))
                    .col(string(Boards::Title))
                    .col(text_null(Boards::Description))
                    .col(
                        timestamp_with_time_zone(Boards::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BoardMembers::Table)
                    .if_not_exists()
                    .col(uuid(BoardMembers::BoardId))
                    .col(uuid(BoardMembers::UserId))
                    .primary_key(
                        Index::create()
                            .col(BoardMembers::BoardId)
                            .col(BoardMembers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_board_members_board")
                            .from(BoardMembers::Table, BoardMembers::BoardId)
                            .to(Boards::Table, Boards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_board_members_user")
                            .from(BoardMembers::Table, BoardMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Boards are looked up by member
        manager
            .create_index(
                Index::create()
                    .name("idx_board_members_user_id")
                    .table(BoardMembers::Table)
                    .col(BoardMembers::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BoardMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Boards::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Boards {
    Table,
    Id,
    Title,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BoardMembers {
    Table,
    BoardId,
    UserId,
}
