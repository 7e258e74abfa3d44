use sea_orm_migration::prelude::*;

/// Id of the seeded `basic` role, granted to every new user
pub const BASIC_ROLE_ID: &str = "01940000-0000-7000-8000-000000000001";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!(
                r#"
                INSERT INTO roles (id, title, description)
                VALUES ('{}', 'basic', 'Default role granted on sign-up')
                ON CONFLICT (title) DO NOTHING
                "#,
                BASIC_ROLE_ID
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM roles WHERE title = 'basic'")
            .await?;

        Ok(())
    }
}
