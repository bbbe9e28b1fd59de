//! Report formatting.
//!
//! Plain-text renderings of quantities, dates, harvest totals and the full data dump used by the
//! diagnostic binary. Everything here reads from a [`Snapshot`] and never fails.

use crate::core::{
    aggregate::Snapshot,
    attributes::CropUnit,
    model::{Activity, DisplaySettings},
};
use chrono::{Datelike, NaiveDate};

/// Formats a quantity without a trailing `.0` for whole numbers, otherwise with at most two
/// decimals.
///
/// # Examples
/// * `8.0` → `"8"`
/// * `1.5` → `"1.5"`
/// * `0.126` → `"0.13"`
#[must_use]
pub fn format_quantity(quantity: f64) -> String {
    let rounded = format!("{quantity:.2}");
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Total with its unit label, e.g. `"8 個"`.
#[must_use]
pub fn format_total(total: f64, unit: CropUnit) -> String {
    format!("{} {}", format_quantity(total), unit.display_name())
}

/// `2025年1月10日`
#[must_use]
pub fn format_japanese_date(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

/// `2025年1月`
#[must_use]
pub fn format_japanese_month(date: NaiveDate) -> String {
    format!("{}年{}月", date.year(), date.month())
}

/// One line per visible crop: `トマト: 合計 8 個`.
#[must_use]
pub fn format_harvest_summary(snapshot: &Snapshot, settings: &DisplaySettings) -> String {
    snapshot
        .harvest_totals(settings)
        .into_iter()
        .map(|entry| {
            format!(
                "{}: 合計 {}\n",
                entry.crop.name,
                format_total(entry.total, entry.unit)
            )
        })
        .collect()
}

/// Single activity line: date, kind, quantity and comment when present.
#[must_use]
pub fn format_activity_line(snapshot: &Snapshot, activity: &Activity) -> String {
    let mut parts = vec![
        format_japanese_date(snapshot.day_of(activity.date)),
        activity.kind.display_name().to_string(),
    ];
    if let Some(quantity) = activity.quantity {
        let unit = activity
            .crop_id
            .and_then(|id| snapshot.resolve_crop(id))
            .map_or("", |crop| crop.unit.display_name());
        parts.push(format!("{}{unit}", format_quantity(quantity)));
    }
    if let Some(comment) = &activity.comment {
        parts.push(format!("({comment})"));
    }
    parts.join(" ")
}

/// Dump of every crop (archived included) with its activities, followed by the orphaned
/// activities that no view shows.
#[must_use]
pub fn format_debug_report(snapshot: &Snapshot) -> String {
    let settings = DisplaySettings {
        show_archived: true,
        ..DisplaySettings::default()
    };

    let crops = snapshot.visible_crops(&settings);
    let mut lines = vec![format!("== Crops ({}) ==", crops.len())];
    for crop in crops {
        let archived = if crop.is_archived { " [archived]" } else { "" };
        lines.push(format!(
            "#{} {} {} {} {}{}",
            crop.order_index,
            crop.name,
            crop.icon.symbol_name(),
            crop.color.hex(),
            crop.unit.display_name(),
            archived
        ));
        lines.extend(
            snapshot
                .activities()
                .iter()
                .filter(|activity| activity.crop_id == Some(crop.id))
                .map(|activity| format!("    {}", format_activity_line(snapshot, activity))),
        );
    }

    let orphans: Vec<&Activity> = snapshot
        .activities()
        .iter()
        .filter(|activity| {
            activity
                .crop_id
                .is_none_or(|id| snapshot.resolve_crop(id).is_none())
        })
        .collect();
    lines.push(format!("== Orphaned activities ({}) ==", orphans.len()));
    for activity in orphans {
        let reference = activity
            .crop_id
            .map_or_else(|| "none".to_string(), |id| id.to_string());
        lines.push(format!(
            "    {} [crop {}]",
            format_activity_line(snapshot, activity),
            reference
        ));
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{
            attributes::{ActivityKind, CropColor, CropIcon},
            model::{ActivityId, Crop, CropId, DisplayColor},
        },
        test_utils::{date, utc_day},
    };
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(8.0), "8");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.126), "0.13");
        assert_eq!(format_quantity(120.0), "120");
    }

    #[test]
    fn test_format_total() {
        assert_eq!(format_total(8.0, CropUnit::Piece), "8 個");
        assert_eq!(format_total(2.5, CropUnit::Kg), "2.5 Kg");
    }

    #[test]
    fn test_format_japanese_date() {
        assert_eq!(format_japanese_date(date(2025, 1, 10)), "2025年1月10日");
        assert_eq!(format_japanese_month(date(2025, 12, 31)), "2025年12月");
    }

    fn sample() -> (Snapshot, Crop, Activity, Activity) {
        let now = Utc::now();
        let tomato = Crop {
            id: CropId::new(),
            order_index: 0,
            name: "トマト".to_string(),
            icon: CropIcon::Tomato,
            color: DisplayColor::Palette(CropColor::Red),
            unit: CropUnit::Piece,
            is_archived: false,
            created_at: now,
            updated_at: now,
        };
        let harvest = Activity {
            id: ActivityId::new(),
            crop_id: Some(tomato.id),
            date: utc_day(2025, 1, 10),
            kind: ActivityKind::Harvest,
            quantity: Some(8.0),
            comment: Some("甘い".to_string()),
            created_at: now,
        };
        let orphan = Activity {
            id: ActivityId::new(),
            crop_id: Some(CropId::new()),
            date: utc_day(2025, 1, 11),
            kind: ActivityKind::Watering,
            quantity: None,
            comment: None,
            created_at: now,
        };
        let snapshot = Snapshot::new(vec![tomato.clone()], vec![harvest.clone(), orphan.clone()])
            .with_offset(FixedOffset::east_opt(0).unwrap());
        (snapshot, tomato, harvest, orphan)
    }

    #[test]
    fn test_format_activity_line() {
        let (snapshot, _, harvest, orphan) = sample();
        assert_eq!(
            format_activity_line(&snapshot, &harvest),
            "2025年1月10日 収穫 8個 (甘い)"
        );
        assert_eq!(format_activity_line(&snapshot, &orphan), "2025年1月11日 水やり");
    }

    #[test]
    fn test_format_harvest_summary() {
        let (snapshot, ..) = sample();
        assert_eq!(
            format_harvest_summary(&snapshot, &DisplaySettings::default()),
            "トマト: 合計 8 個\n"
        );
    }

    #[test]
    fn test_format_debug_report_lists_orphans() {
        let (snapshot, tomato, _, orphan) = sample();
        let report = format_debug_report(&snapshot);

        assert!(report.contains("== Crops (1) =="));
        assert!(report.contains(&format!("#0 {} icon_tomato", tomato.name)));
        assert!(report.contains("== Orphaned activities (1) =="));
        assert!(report.contains(&orphan.crop_id.unwrap().to_string()));
    }

    #[test]
    fn test_format_debug_report_layout() {
        let (snapshot, _, _, orphan) = sample();
        let expected = format!(
            "== Crops (1) ==\n\
             #0 トマト icon_tomato {} 個\n\
             \x20   2025年1月10日 収穫 8個 (甘い)\n\
             == Orphaned activities (1) ==\n\
             \x20   2025年1月11日 水やり [crop {}]\n",
            CropColor::Red.hex(),
            orphan.crop_id.unwrap()
        );
        assert_eq!(format_debug_report(&snapshot), expected);
    }

    #[test]
    fn test_format_harvest_summary_empty() {
        let snapshot = Snapshot::new(Vec::new(), Vec::new());
        assert_eq!(format_harvest_summary(&snapshot, &DisplaySettings::default()), "");
    }
}
