//! Entity store - owns crops and activities and performs every mutation.
//!
//! Mutations are applied in memory first, staged on the persistence adapter, and committed once
//! per operation. A failed commit is returned to the caller but the in-memory change stays
//! applied; the adapter keeps the staged records and retries them on the next commit.
//!
//! Validation and not-found conditions are always surfaced. Deleting a crop removes only the
//! crop record: its activities remain and keep pointing at the missing id.

use crate::{
    core::{
        aggregate::Snapshot,
        attributes::{ActivityKind, CropIcon, CropUnit},
        model::{
            Activity, ActivityChanges, ActivityFilter, ActivityId, Crop, CropChanges, CropId,
            DisplayColor, DisplaySettings, normalize_comment, validate_name, validate_quantity,
        },
        persistence::{PersistenceAdapter, Record, RecordKey},
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, info};

/// In-memory owner of both collections, backed by a [`PersistenceAdapter`].
#[derive(Debug)]
pub struct EntityStore<P> {
    adapter: P,
    crops: Vec<Crop>,
    activities: Vec<Activity>,
}

impl<P: PersistenceAdapter> EntityStore<P> {
    /// Loads every record from `adapter`. Activities are held in creation order,
    /// `(created_at, id)`.
    pub async fn open(adapter: P) -> Result<Self> {
        let (crops, mut activities) = adapter.load_all().await?;
        activities.sort_by_key(Activity::sort_key);
        info!(
            "Loaded {} crop(s) and {} activity record(s)",
            crops.len(),
            activities.len()
        );
        Ok(Self {
            adapter,
            crops,
            activities,
        })
    }

    #[must_use]
    pub const fn adapter(&self) -> &P {
        &self.adapter
    }

    pub const fn adapter_mut(&mut self) -> &mut P {
        &mut self.adapter
    }

    // ---- crops -------------------------------------------------------------------------

    /// Creates a crop at the end of the list (`order_index = max + 1`, or 0 when empty).
    ///
    /// # Errors
    /// [`Error::Validation`] when `name` is empty or whitespace-only, or when the largest stored
    /// `order_index` leaves no room after it.
    ///
    /// On a failed commit the crop is already held in memory and the error is returned. It is
    /// listed by [`EntityStore::list_crops`] and written by the next successful commit.
    pub async fn create_crop(
        &mut self,
        name: &str,
        icon: CropIcon,
        color: DisplayColor,
        unit: CropUnit,
    ) -> Result<Crop> {
        let name = validate_name(name)?;
        let order_index = self
            .crops
            .iter()
            .map(|crop| crop.order_index)
            .max()
            .map_or(Some(0), |max| max.checked_add(1))
            .ok_or_else(|| Error::validation("No order index left after the last crop"))?;

        let now = Utc::now();
        let crop = Crop {
            id: CropId::new(),
            order_index,
            name,
            icon,
            color,
            unit,
            is_archived: false,
            created_at: now,
            updated_at: now,
        };

        self.crops.push(crop.clone());
        self.adapter.insert(Record::Crop(crop.clone()));
        debug!("Created crop {} ({}) at index {}", crop.id, crop.name, order_index);
        self.adapter.commit().await?;

        Ok(crop)
    }

    /// Applies a partial update. Never changes `order_index` or activity links.
    pub async fn update_crop(&mut self, id: CropId, changes: CropChanges) -> Result<()> {
        let name = changes.name.as_deref().map(validate_name).transpose()?;
        let crop = self.crop_mut(id)?;

        if let Some(name) = name {
            crop.name = name;
        }
        if let Some(icon) = changes.icon {
            crop.icon = icon;
        }
        if let Some(color) = changes.color {
            crop.color = color;
        }
        if let Some(unit) = changes.unit {
            crop.unit = unit;
        }
        crop.updated_at = Utc::now();

        let record = Record::Crop(crop.clone());
        self.adapter.insert(record);
        self.adapter.commit().await
    }

    /// Hides a crop from primary views. Idempotent; activities are untouched.
    pub async fn archive_crop(&mut self, id: CropId) -> Result<()> {
        self.set_archived(id, true).await
    }

    /// Reverses [`EntityStore::archive_crop`]. Idempotent.
    pub async fn restore_crop(&mut self, id: CropId) -> Result<()> {
        self.set_archived(id, false).await
    }

    async fn set_archived(&mut self, id: CropId, archived: bool) -> Result<()> {
        let crop = self.crop_mut(id)?;
        if crop.is_archived == archived {
            return Ok(());
        }
        crop.is_archived = archived;
        crop.updated_at = Utc::now();

        let record = Record::Crop(crop.clone());
        info!("Crop {} archived={}", id, archived);
        self.adapter.insert(record);
        self.adapter.commit().await
    }

    /// Removes the crop record. Activities that referenced it are kept as they are.
    ///
    /// # Errors
    /// [`Error::CropNotFound`] when `id` is unknown, including a second delete of the same id.
    pub async fn delete_crop(&mut self, id: CropId) -> Result<()> {
        let position = self
            .crops
            .iter()
            .position(|crop| crop.id == id)
            .ok_or(Error::CropNotFound { id })?;
        let crop = self.crops.remove(position);

        let left_behind = self
            .activities
            .iter()
            .filter(|activity| activity.crop_id == Some(id))
            .count();
        info!(
            "Deleted crop {} ({}); {} activity record(s) keep the reference",
            id, crop.name, left_behind
        );

        self.adapter.delete(RecordKey::Crop(id));
        self.adapter.commit().await
    }

    /// Rewrites `order_index` from a full ordering of the non-archived crops.
    ///
    /// `ordered` must contain every non-archived crop id exactly once and nothing else. Those
    /// crops get `0..n` in list order; archived crops follow at `n..` in their previous relative
    /// order. Applying the same list twice yields the same assignment.
    ///
    /// # Errors
    /// [`Error::Validation`] on a missing, duplicated, unknown or archived id.
    pub async fn reorder_crops(&mut self, ordered: &[CropId]) -> Result<()> {
        let active: HashSet<CropId> = self
            .crops
            .iter()
            .filter(|crop| !crop.is_archived)
            .map(|crop| crop.id)
            .collect();

        let mut seen = HashSet::with_capacity(ordered.len());
        for id in ordered {
            if !active.contains(id) {
                return Err(Error::validation(format!(
                    "Reorder list contains unknown or archived crop {id}"
                )));
            }
            if !seen.insert(*id) {
                return Err(Error::validation(format!(
                    "Reorder list contains crop {id} more than once"
                )));
            }
        }
        if seen.len() != active.len() {
            return Err(Error::validation(format!(
                "Reorder list has {} crop(s) but {} are active",
                seen.len(),
                active.len()
            )));
        }

        let mut archived: Vec<&Crop> = self.crops.iter().filter(|crop| crop.is_archived).collect();
        archived.sort_by_key(|crop| crop.sort_key());
        let archived: Vec<CropId> = archived.into_iter().map(|crop| crop.id).collect();

        let now = Utc::now();
        for (position, id) in ordered.iter().chain(archived.iter()).enumerate() {
            let index = i32::try_from(position)
                .map_err(|_| Error::validation("Too many crops to reorder"))?;
            let crop = self.crop_mut(*id)?;
            if crop.order_index != index {
                crop.order_index = index;
                crop.updated_at = now;
                let record = Record::Crop(crop.clone());
                self.adapter.insert(record);
            }
        }

        debug!("Reordered {} crop(s)", ordered.len());
        self.adapter.commit().await
    }

    /// Crops ordered by `(order_index, created_at, id)`.
    #[must_use]
    pub fn list_crops(&self, include_archived: bool) -> Vec<Crop> {
        let mut crops: Vec<Crop> = self
            .crops
            .iter()
            .filter(|crop| include_archived || !crop.is_archived)
            .cloned()
            .collect();
        crops.sort_by_key(Crop::sort_key);
        crops
    }

    /// [`EntityStore::list_crops`] driven by the user's display settings.
    #[must_use]
    pub fn visible_crops(&self, settings: &DisplaySettings) -> Vec<Crop> {
        self.list_crops(settings.show_archived)
    }

    #[must_use]
    pub fn crop(&self, id: CropId) -> Option<&Crop> {
        self.crops.iter().find(|crop| crop.id == id)
    }

    fn crop_mut(&mut self, id: CropId) -> Result<&mut Crop> {
        self.crops
            .iter_mut()
            .find(|crop| crop.id == id)
            .ok_or(Error::CropNotFound { id })
    }

    /// A crop activities may be attached to: present and not archived.
    fn live_crop(&self, id: CropId) -> Result<&Crop> {
        self.crop(id)
            .filter(|crop| !crop.is_archived)
            .ok_or(Error::CropNotFound { id })
    }

    // ---- activities --------------------------------------------------------------------

    /// Records an activity against a live crop.
    ///
    /// # Errors
    /// [`Error::CropNotFound`] when the crop is missing or archived, [`Error::Validation`]
    /// when `quantity` is negative or not finite.
    ///
    /// As with [`EntityStore::create_crop`], a failed commit leaves the activity in memory; it
    /// shows up in [`EntityStore::list_activities`] and is written by the next successful
    /// commit.
    pub async fn create_activity(
        &mut self,
        crop_id: CropId,
        date: DateTime<Utc>,
        kind: ActivityKind,
        quantity: Option<f64>,
        comment: Option<String>,
    ) -> Result<Activity> {
        self.live_crop(crop_id)?;
        let quantity = validate_quantity(quantity)?;

        let activity = Activity {
            id: ActivityId::new(),
            crop_id: Some(crop_id),
            date,
            kind,
            quantity,
            comment: normalize_comment(comment),
            created_at: Utc::now(),
        };

        self.activities.push(activity.clone());
        self.adapter.insert(Record::Activity(activity.clone()));
        debug!(
            "Created {} activity {} for crop {}",
            kind.display_name(),
            activity.id,
            crop_id
        );
        self.adapter.commit().await?;

        Ok(activity)
    }

    /// Overwrites the given fields in place; the identifier and crop link are kept.
    pub async fn update_activity(&mut self, id: ActivityId, changes: ActivityChanges) -> Result<()> {
        let quantity = changes.quantity.map(validate_quantity).transpose()?;
        let activity = self.activity_mut(id)?;

        if let Some(date) = changes.date {
            activity.date = date;
        }
        if let Some(kind) = changes.kind {
            activity.kind = kind;
        }
        if let Some(quantity) = quantity {
            activity.quantity = quantity;
        }
        if let Some(comment) = changes.comment {
            activity.comment = normalize_comment(comment);
        }

        let record = Record::Activity(activity.clone());
        self.adapter.insert(record);
        self.adapter.commit().await
    }

    /// Re-links an activity to another live crop.
    pub async fn link_activity(&mut self, id: ActivityId, crop_id: CropId) -> Result<()> {
        self.live_crop(crop_id)?;
        self.set_link(id, Some(crop_id)).await
    }

    /// Detaches an activity from its crop, leaving it orphaned.
    pub async fn unlink_activity(&mut self, id: ActivityId) -> Result<()> {
        self.set_link(id, None).await
    }

    async fn set_link(&mut self, id: ActivityId, crop_id: Option<CropId>) -> Result<()> {
        let activity = self.activity_mut(id)?;
        activity.crop_id = crop_id;

        let record = Record::Activity(activity.clone());
        self.adapter.insert(record);
        self.adapter.commit().await
    }

    /// Removes an activity. Its crop's derived collection no longer includes it.
    pub async fn delete_activity(&mut self, id: ActivityId) -> Result<()> {
        let position = self
            .activities
            .iter()
            .position(|activity| activity.id == id)
            .ok_or(Error::ActivityNotFound { id })?;
        self.activities.remove(position);

        debug!("Deleted activity {}", id);
        self.adapter.delete(RecordKey::Activity(id));
        self.adapter.commit().await
    }

    /// Raw activity listing in creation order. No display filtering is applied.
    #[must_use]
    pub fn list_activities(&self, filter: ActivityFilter) -> Vec<Activity> {
        self.activities
            .iter()
            .filter(|activity| match filter {
                ActivityFilter::All => true,
                ActivityFilter::Crop(id) => activity.crop_id == Some(id),
                ActivityFilter::Unlinked => activity.crop_id.is_none(),
            })
            .cloned()
            .collect()
    }

    /// Activities whose crop reference is null or no longer resolves.
    #[must_use]
    pub fn orphaned_activities(&self) -> Vec<Activity> {
        self.activities
            .iter()
            .filter(|activity| activity.crop_id.is_none_or(|id| self.crop(id).is_none()))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn activity(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    fn activity_mut(&mut self, id: ActivityId) -> Result<&mut Activity> {
        self.activities
            .iter_mut()
            .find(|activity| activity.id == id)
            .ok_or(Error::ActivityNotFound { id })
    }

    /// Immutable copy of the current state for the aggregation engine.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.crops.clone(), self.activities.clone())
    }
}
