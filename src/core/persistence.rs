//! Persistence boundary for the entity store.
//!
//! The store stages record changes with [`PersistenceAdapter::insert`] and
//! [`PersistenceAdapter::delete`], then calls [`PersistenceAdapter::commit`] once per logical
//! mutation. A failed commit is reported to the caller; the staged changes are kept and
//! re-applied by the next commit, since both insert-or-replace and delete are idempotent.

use crate::{
    core::{
        attributes::{ActivityKind, CropIcon, CropUnit},
        model::{Activity, ActivityId, Crop, CropId, DisplayColor},
    },
    entities::{self, ActivityColumn, CropColumn, activity, crop},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, warn};

/// A full record to insert or replace.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Crop row
    Crop(Crop),
    /// Activity row
    Activity(Activity),
}

/// Identifies a record to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
    /// Crop row
    Crop(CropId),
    /// Activity row
    Activity(ActivityId),
}

#[derive(Debug, Clone, PartialEq)]
enum PendingChange {
    Upsert(Record),
    Delete(RecordKey),
}

/// Durable storage used by [`crate::core::store::EntityStore`].
#[allow(async_fn_in_trait)]
pub trait PersistenceAdapter {
    /// Loads every stored crop and activity. Activities come back in creation order.
    async fn load_all(&self) -> Result<(Vec<Crop>, Vec<Activity>)>;

    /// Stages an insert-or-replace of `record`.
    fn insert(&mut self, record: Record);

    /// Stages removal of the record identified by `key`.
    fn delete(&mut self, key: RecordKey);

    /// Applies all staged changes atomically.
    ///
    /// # Errors
    /// Returns [`Error::Persistence`] when the changes could not be made durable.
    async fn commit(&mut self) -> Result<()>;
}

impl From<crop::Model> for Crop {
    fn from(model: crop::Model) -> Self {
        Self {
            id: CropId::from_uuid(model.id),
            order_index: model.order_index,
            name: model.name,
            icon: CropIcon::decode(model.icon_value),
            color: DisplayColor::decode(model.color_value, model.custom_color_hex.as_deref()),
            unit: CropUnit::decode(model.unit_value),
            is_archived: model.is_archived,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Crop> for crop::ActiveModel {
    fn from(crop: &Crop) -> Self {
        let (color_value, custom_color_hex) = crop.color.encode();
        Self {
            id: Set(crop.id.as_uuid()),
            order_index: Set(crop.order_index),
            name: Set(crop.name.clone()),
            icon_value: Set(crop.icon.code()),
            color_value: Set(color_value),
            custom_color_hex: Set(custom_color_hex),
            unit_value: Set(crop.unit.code()),
            is_archived: Set(crop.is_archived),
            created_at: Set(crop.created_at),
            updated_at: Set(crop.updated_at),
        }
    }
}

impl From<activity::Model> for Activity {
    fn from(model: activity::Model) -> Self {
        Self {
            id: ActivityId::from_uuid(model.id),
            crop_id: model.crop_id.map(CropId::from_uuid),
            date: model.date,
            kind: ActivityKind::decode(model.kind_value),
            quantity: model.quantity,
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}

impl From<&Activity> for activity::ActiveModel {
    fn from(activity: &Activity) -> Self {
        Self {
            id: Set(activity.id.as_uuid()),
            crop_id: Set(activity.crop_id.map(CropId::as_uuid)),
            date: Set(activity.date),
            kind_value: Set(activity.kind.code()),
            quantity: Set(activity.quantity),
            comment: Set(activity.comment.clone()),
            created_at: Set(activity.created_at),
        }
    }
}

/// `SQLite` persistence through `SeaORM`.
#[derive(Debug)]
pub struct SeaOrmAdapter {
    db: DatabaseConnection,
    pending: Vec<PendingChange>,
}

impl SeaOrmAdapter {
    /// Wraps a connection whose tables already exist
    /// (see [`crate::config::database::create_tables`]).
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Number of staged changes not yet committed.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    async fn apply_pending(&self) -> std::result::Result<(), DbErr> {
        // One transaction per commit
        let txn = self.db.begin().await?;

        for change in &self.pending {
            match change {
                PendingChange::Upsert(Record::Crop(row)) => {
                    entities::Crop::delete_by_id(row.id.as_uuid())
                        .exec(&txn)
                        .await?;
                    crop::ActiveModel::from(row).insert(&txn).await?;
                }
                PendingChange::Upsert(Record::Activity(row)) => {
                    entities::Activity::delete_by_id(row.id.as_uuid())
                        .exec(&txn)
                        .await?;
                    activity::ActiveModel::from(row).insert(&txn).await?;
                }
                PendingChange::Delete(RecordKey::Crop(id)) => {
                    entities::Crop::delete_by_id(id.as_uuid()).exec(&txn).await?;
                }
                PendingChange::Delete(RecordKey::Activity(id)) => {
                    entities::Activity::delete_by_id(id.as_uuid())
                        .exec(&txn)
                        .await?;
                }
            }
        }

        txn.commit().await
    }
}

impl PersistenceAdapter for SeaOrmAdapter {
    async fn load_all(&self) -> Result<(Vec<Crop>, Vec<Activity>)> {
        let crops = entities::Crop::find()
            .order_by_asc(CropColumn::OrderIndex)
            .order_by_asc(CropColumn::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Crop::from)
            .collect();

        let activities = entities::Activity::find()
            .order_by_asc(ActivityColumn::CreatedAt)
            .order_by_asc(ActivityColumn::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Activity::from)
            .collect();

        Ok((crops, activities))
    }

    fn insert(&mut self, record: Record) {
        self.pending.push(PendingChange::Upsert(record));
    }

    fn delete(&mut self, key: RecordKey) {
        self.pending.push(PendingChange::Delete(key));
    }

    async fn commit(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        match self.apply_pending().await {
            Ok(()) => {
                debug!("Committed {} staged change(s)", self.pending.len());
                self.pending.clear();
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Commit failed, {} change(s) stay staged: {}",
                    self.pending.len(),
                    e
                );
                Err(Error::Persistence {
                    message: e.to_string(),
                })
            }
        }
    }
}

/// In-process storage for previews and tests.
///
/// Committed records survive as long as the adapter does. Commits can be made to fail on
/// demand to exercise the store's failure reporting.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    crops: Vec<Crop>,
    activities: Vec<Activity>,
    pending: Vec<PendingChange>,
    fail_commits: bool,
}

impl MemoryAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with records that are already durable, e.g. rows left behind by an older
    /// version that deleted crops without touching their activities.
    #[must_use]
    pub const fn with_records(crops: Vec<Crop>, activities: Vec<Activity>) -> Self {
        Self {
            crops,
            activities,
            pending: Vec::new(),
            fail_commits: false,
        }
    }

    /// Makes every following commit fail until reset.
    pub fn set_fail_commits(&mut self, fail: bool) {
        self.fail_commits = fail;
    }

    #[must_use]
    pub fn durable_crops(&self) -> &[Crop] {
        &self.crops
    }

    #[must_use]
    pub fn durable_activities(&self) -> &[Activity] {
        &self.activities
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn apply(&mut self, change: PendingChange) {
        match change {
            PendingChange::Upsert(Record::Crop(crop)) => {
                match self.crops.iter_mut().find(|c| c.id == crop.id) {
                    Some(slot) => *slot = crop,
                    None => self.crops.push(crop),
                }
            }
            PendingChange::Upsert(Record::Activity(activity)) => {
                match self.activities.iter_mut().find(|a| a.id == activity.id) {
                    Some(slot) => *slot = activity,
                    None => self.activities.push(activity),
                }
            }
            PendingChange::Delete(RecordKey::Crop(id)) => self.crops.retain(|c| c.id != id),
            PendingChange::Delete(RecordKey::Activity(id)) => {
                self.activities.retain(|a| a.id != id);
            }
        }
    }
}

impl PersistenceAdapter for MemoryAdapter {
    async fn load_all(&self) -> Result<(Vec<Crop>, Vec<Activity>)> {
        Ok((self.crops.clone(), self.activities.clone()))
    }

    fn insert(&mut self, record: Record) {
        self.pending.push(PendingChange::Upsert(record));
    }

    fn delete(&mut self, key: RecordKey) {
        self.pending.push(PendingChange::Delete(key));
    }

    async fn commit(&mut self) -> Result<()> {
        if self.fail_commits {
            warn!(
                "Simulated commit failure, {} change(s) stay staged",
                self.pending.len()
            );
            return Err(Error::Persistence {
                message: "commit rejected by memory adapter".to_string(),
            });
        }

        for change in std::mem::take(&mut self.pending) {
            self.apply(change);
        }
        Ok(())
    }
}
