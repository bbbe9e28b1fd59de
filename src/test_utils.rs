//! Shared test utilities for `HomeGarden`.
//!
//! Helpers for building stores over an in-memory `SQLite` database or the in-process adapter,
//! plus small date and entity constructors with sensible defaults.

use crate::{
    core::{
        aggregate::Snapshot,
        attributes::{ActivityKind, CropColor, CropIcon, CropUnit},
        model::{Activity, Crop, CropId},
        persistence::{MemoryAdapter, PersistenceAdapter, SeaOrmAdapter},
        store::EntityStore,
    },
    errors::Result,
};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Empty store backed by [`MemoryAdapter`].
pub async fn setup_memory_store() -> Result<EntityStore<MemoryAdapter>> {
    EntityStore::open(MemoryAdapter::new()).await
}

/// Empty store backed by a fresh in-memory `SQLite` database.
pub async fn setup_sqlite_store() -> Result<EntityStore<SeaOrmAdapter>> {
    let db = setup_test_db().await?;
    EntityStore::open(SeaOrmAdapter::new(db)).await
}

/// Noon UTC on the given day, so small offsets never change the calendar day.
#[allow(clippy::unwrap_used)]
pub fn utc_day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Snapshot of `store` pinned to UTC.
#[allow(clippy::unwrap_used)]
pub fn utc_snapshot<P: PersistenceAdapter>(store: &EntityStore<P>) -> Snapshot {
    store
        .snapshot()
        .with_offset(FixedOffset::east_opt(0).unwrap())
}

/// Creates a crop with defaults.
///
/// # Defaults
/// * `icon`: Tomato
/// * `color`: Red
/// * `unit`: Piece
pub async fn create_test_crop<P: PersistenceAdapter>(
    store: &mut EntityStore<P>,
    name: &str,
) -> Result<Crop> {
    store
        .create_crop(name, CropIcon::Tomato, CropColor::Red.into(), CropUnit::Piece)
        .await
}

/// Records a watering activity at noon UTC on the given day.
pub async fn create_test_activity<P: PersistenceAdapter>(
    store: &mut EntityStore<P>,
    crop_id: CropId,
    year: i32,
    month: u32,
    day: u32,
    quantity: Option<f64>,
) -> Result<Activity> {
    store
        .create_activity(
            crop_id,
            utc_day(year, month, day),
            ActivityKind::Watering,
            quantity,
            None,
        )
        .await
}
