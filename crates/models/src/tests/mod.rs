/// Product accessor tests against an in-memory sqlite database
pub mod product_tests;

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh, migrated in-memory database; each call gets its own.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let cfg = configs::DatabaseConfig::single("sqlite::memory:");
    let db = crate::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
