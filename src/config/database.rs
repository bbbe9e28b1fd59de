//! Database configuration module for `HomeGarden`.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are generated from
//! the entity definitions with `Schema::create_table_from_entity`, so the schema always matches
//! the Rust structs. Creation is idempotent and safe to run on every start.

use crate::entities::{Activity, Crop};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::debug;

/// Default location of the garden database.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/home_garden.sqlite?mode=rwc";

/// Gets the database URL override from the `DATABASE_URL` environment variable, if set.
#[must_use]
pub fn get_database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `crops` and `activities` tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut crop_table = schema.create_table_from_entity(Crop);
    crop_table.if_not_exists();
    let mut activity_table = schema.create_table_from_entity(Activity);
    activity_table.if_not_exists();

    db.execute(builder.build(&crop_table)).await?;
    db.execute(builder.build(&activity_table)).await?;

    Ok(())
}
