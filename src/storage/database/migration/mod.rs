use sea_orm_migration::prelude::*;

mod m20250101_000001_create_schools_table;
mod m20250101_000002_create_contacts_table;
mod m20250101_000003_create_products_table;
mod m20250101_000004_create_vendors_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_schools_table::Migration),
            Box::new(m20250101_000002_create_contacts_table::Migration),
            Box::new(m20250101_000003_create_products_table::Migration),
            Box::new(m20250101_000004_create_vendors_table::Migration),
        ]
    }
}
