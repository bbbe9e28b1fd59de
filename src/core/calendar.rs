//! Calendar arithmetic for the month view.
//!
//! Activity timestamps are compared by calendar day in a single reference time zone, by default
//! the system's own zone with its daylight-saving rules. The month grid is locale independent:
//! column 0 is whatever weekday the caller configures.

use chrono::{DateTime, Datelike, FixedOffset, Local, Months, NaiveDate, Utc, Weekday};

/// Time zone in which two timestamps are "the same day".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceZone {
    /// The system time zone; the offset is looked up per timestamp.
    #[default]
    Local,
    /// A pinned offset.
    Fixed(FixedOffset),
}

impl ReferenceZone {
    /// Calendar day of `timestamp` in this zone.
    #[must_use]
    pub fn day_of(self, timestamp: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => timestamp.with_timezone(&Local).date_naive(),
            Self::Fixed(offset) => timestamp.with_timezone(&offset).date_naive(),
        }
    }
}

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    /// Padding before the 1st of the month.
    Blank,
    /// A day of the month.
    Day(NaiveDate),
}

impl DayCell {
    #[must_use]
    pub const fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Blank => None,
            Self::Day(date) => Some(date),
        }
    }
}

/// Number of blank cells before a day falling on `weekday` when columns start at `first_weekday`.
#[must_use]
pub fn leading_blanks(weekday: Weekday, first_weekday: Weekday) -> usize {
    let column = (weekday.num_days_from_monday() + 7 - first_weekday.num_days_from_monday()) % 7;
    column as usize
}

/// Cells for the month containing `anchor`: leading blanks, then every day of the month.
/// No trailing blanks are produced.
#[must_use]
pub fn month_grid(anchor: NaiveDate, first_weekday: Weekday) -> Vec<DayCell> {
    let Some(first) = anchor.with_day(1) else {
        return Vec::new();
    };

    let blanks = leading_blanks(first.weekday(), first_weekday);
    std::iter::repeat_n(DayCell::Blank, blanks)
        .chain(
            first
                .iter_days()
                .take_while(|day| day.month() == first.month())
                .map(DayCell::Day),
        )
        .collect()
}

/// Moves `anchor` by `months` (negative goes back), clamping the day to the target month.
/// Returns `anchor` unchanged if the result would leave chrono's supported range.
#[must_use]
pub fn shift_month(anchor: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        anchor.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        anchor.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(anchor)
}
