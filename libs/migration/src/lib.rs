pub use sea_orm_migration::prelude::*;

mod m20260105_000000_bootstrap;
mod m20260105_000001_create_users;
mod m20260105_000002_create_roles_and_wallets;
mod m20260105_000003_create_boards;
mod m20260105_000004_seed_basic_role;

pub use m20260105_000004_seed_basic_role::BASIC_ROLE_ID;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000000_bootstrap::Migration),
            Box::new(m20260105_000001_create_users::Migration),
            Box::new(m20260105_000002_create_roles_and_wallets::Migration),
            Box::new(m20260105_000003_create_boards::Migration),
            Box::new(m20260105_000004_seed_basic_role::Migration),
        ]
    }
}
