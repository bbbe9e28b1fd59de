//! Read-side aggregation over an immutable snapshot of the store.
//!
//! Nothing here mutates or fails. An activity whose crop reference is null, points at a crop
//! that no longer exists, or points at an archived crop is excluded from the display views
//! instead of raising: crop deletion does not cascade, so dangling references are expected.

use crate::core::{
    attributes::CropUnit,
    calendar::{self, DayCell, ReferenceZone},
    model::{Activity, Crop, CropId, DisplayColor, DisplaySettings},
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::collections::HashMap;

/// Point-in-time copy of both collections.
///
/// Activities keep the store's sequence (creation order); that sequence is the "input order"
/// used for every tie-break below. The snapshot is `Send + Sync` and may be queried from many
/// threads at once.
#[derive(Debug, Clone)]
pub struct Snapshot {
    crops: Vec<Crop>,
    activities: Vec<Activity>,
    crop_index: HashMap<CropId, usize>,
    zone: ReferenceZone,
}

/// Activities sharing one owning crop. `crop` is `None` for orphaned activities.
#[derive(Debug, Clone, PartialEq)]
pub struct CropGroup<'a> {
    /// Resolved owning crop
    pub crop: Option<&'a Crop>,
    /// Members, in input order
    pub activities: Vec<&'a Activity>,
}

/// Quantity total for one crop.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestTotal<'a> {
    /// The crop
    pub crop: &'a Crop,
    /// Sum of recorded quantities
    pub total: f64,
    /// Unit used to display `total`
    pub unit: CropUnit,
}

/// A month-grid cell with the colour dots to draw under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCell {
    /// Blank or day
    pub cell: DayCell,
    /// Colours for that day (empty for blanks)
    pub colors: Vec<DisplayColor>,
}

impl Snapshot {
    /// Builds a snapshot comparing calendar days in the system time zone.
    #[must_use]
    pub fn new(crops: Vec<Crop>, activities: Vec<Activity>) -> Self {
        let crop_index = crops
            .iter()
            .enumerate()
            .map(|(position, crop)| (crop.id, position))
            .collect();
        Self {
            crops,
            activities,
            crop_index,
            zone: ReferenceZone::Local,
        }
    }

    /// Pins the reference time zone used for calendar-day equality.
    #[must_use]
    pub const fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.zone = ReferenceZone::Fixed(offset);
        self
    }

    #[must_use]
    pub const fn zone(&self) -> ReferenceZone {
        self.zone
    }

    /// Calendar day of `timestamp` in the reference zone.
    #[must_use]
    pub fn day_of(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        self.zone.day_of(timestamp)
    }

    #[must_use]
    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Looks up a crop that still exists, archived or not.
    #[must_use]
    pub fn resolve_crop(&self, id: CropId) -> Option<&Crop> {
        self.crop_index.get(&id).map(|&position| &self.crops[position])
    }

    /// The activity's crop if it is present and not archived.
    #[must_use]
    pub fn display_crop(&self, activity: &Activity) -> Option<&Crop> {
        activity
            .crop_id
            .and_then(|id| self.resolve_crop(id))
            .filter(|crop| !crop.is_archived)
    }

    fn on_day(&self, activity: &Activity, day: NaiveDate) -> bool {
        self.day_of(activity.date) == day
    }

    /// Activities on `day` whose crop is displayable, in input order.
    #[must_use]
    pub fn activities_for_date(&self, day: NaiveDate) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|activity| self.on_day(activity, day))
            .filter(|activity| self.display_crop(activity).is_some())
            .collect()
    }

    /// Distinct crop colours for `day`, at most `max_colors`.
    ///
    /// Colours are taken in input order and de-duplicated keeping the first occurrence, so the
    /// kept colours are the first `max_colors` distinct ones encountered.
    #[must_use]
    pub fn colors_for_date(&self, day: NaiveDate, max_colors: usize) -> Vec<DisplayColor> {
        let mut colors: Vec<DisplayColor> = Vec::new();
        for activity in self.activities.iter().filter(|a| self.on_day(a, day)) {
            if colors.len() == max_colors {
                break;
            }
            let Some(crop) = self.display_crop(activity) else {
                continue;
            };
            if !colors.contains(&crop.color) {
                colors.push(crop.color.clone());
            }
        }
        colors
    }

    /// Partitions `activities` by owning crop.
    ///
    /// References that are null or no longer resolve form the `None` group. Groups are ordered
    /// by crop name (`str` ordering), with the `None` group keyed as the empty string so it sorts
    /// first. The sort is stable: equal names keep first-encountered order.
    #[must_use]
    pub fn group_by_crop<'a, I>(&'a self, activities: I) -> Vec<CropGroup<'a>>
    where
        I: IntoIterator<Item = &'a Activity>,
    {
        let mut groups: Vec<CropGroup<'a>> = Vec::new();
        for activity in activities {
            let crop = activity.crop_id.and_then(|id| self.resolve_crop(id));
            let key = crop.map(|c| c.id);
            match groups.iter_mut().find(|g| g.crop.map(|c| c.id) == key) {
                Some(group) => group.activities.push(activity),
                None => groups.push(CropGroup {
                    crop,
                    activities: vec![activity],
                }),
            }
        }
        groups.sort_by(|a, b| group_name(a).cmp(group_name(b)));
        groups
    }

    /// Sum of the recorded quantities of activities linked to `crop_id`. Missing quantities
    /// contribute nothing.
    #[must_use]
    pub fn total_quantity(&self, crop_id: CropId) -> f64 {
        self.activities
            .iter()
            .filter(|activity| activity.crop_id == Some(crop_id))
            .filter_map(|activity| activity.quantity)
            .sum()
    }

    /// Crops in display order, honouring `settings.show_archived`.
    #[must_use]
    pub fn visible_crops(&self, settings: &DisplaySettings) -> Vec<&Crop> {
        let mut crops: Vec<&Crop> = self
            .crops
            .iter()
            .filter(|crop| settings.show_archived || !crop.is_archived)
            .collect();
        crops.sort_by_key(|crop| crop.sort_key());
        crops
    }

    /// One total per visible crop, in display order.
    #[must_use]
    pub fn harvest_totals(&self, settings: &DisplaySettings) -> Vec<HarvestTotal<'_>> {
        self.visible_crops(settings)
            .into_iter()
            .map(|crop| HarvestTotal {
                crop,
                total: self.total_quantity(crop.id),
                unit: crop.unit,
            })
            .collect()
    }

    /// Month grid (see [`calendar::month_grid`]) with colour dots filled in for every day cell.
    #[must_use]
    pub fn month_view(&self, anchor: NaiveDate, settings: &DisplaySettings) -> Vec<MonthCell> {
        calendar::month_grid(anchor, settings.first_weekday)
            .into_iter()
            .map(|cell| MonthCell {
                cell,
                colors: cell
                    .date()
                    .map(|day| self.colors_for_date(day, settings.max_calendar_colors))
                    .unwrap_or_default(),
            })
            .collect()
    }
}

fn group_name<'a>(group: &CropGroup<'a>) -> &'a str {
    group.crop.map_or("", |crop| crop.name.as_str())
}
