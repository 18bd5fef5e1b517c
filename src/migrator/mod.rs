use sea_orm_migration::prelude::*;

mod m20260601_000001_create_library_tables;
mod m20260705_000002_create_video_temp;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_library_tables::Migration),
            Box::new(m20260705_000002_create_video_temp::Migration),
        ]
    }
}
