//! Domain records held by the entity store.
//!
//! `Crop` and `Activity` are independent records joined by a nullable foreign key
//! (`Activity::crop_id`). A crop's activity collection is derived from that key rather than
//! stored, so the two sides cannot disagree while both are live.

use crate::{
    core::attributes::{ActivityKind, CUSTOM_COLOR_CODE, CropColor, CropIcon, CropUnit},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropId(Uuid);

/// Stable identifier of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(Uuid);

macro_rules! uuid_id {
    ($name:ident) => {
        impl $name {
            /// Generates a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an identifier read back from storage.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[must_use]
            pub const fn as_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(CropId);
uuid_id!(ActivityId);

/// A validated `#RRGGBB` colour string. The original spelling is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parses a `#RRGGBB` string (hex digits in either case).
    pub fn parse(raw: &str) -> Result<Self> {
        let well_formed = raw.len() == 7
            && raw.starts_with('#')
            && raw[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !well_formed {
            return Err(Error::validation(format!(
                "Custom colour must be #RRGGBB, got {raw:?}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The colour a crop is drawn with: a palette member or a custom hex value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayColor {
    /// One of the fixed palette colours.
    Palette(CropColor),
    /// The custom marker together with its `#RRGGBB` value.
    Custom(HexColor),
}

impl DisplayColor {
    /// Builds a custom colour from a `#RRGGBB` string.
    pub fn custom(raw: &str) -> Result<Self> {
        HexColor::parse(raw).map(Self::Custom)
    }

    /// Storage encoding: `(color_value, custom_color_hex)`.
    #[must_use]
    pub fn encode(&self) -> (i32, Option<String>) {
        match self {
            Self::Palette(color) => (color.code(), None),
            Self::Custom(hex) => (CUSTOM_COLOR_CODE, Some(hex.as_str().to_string())),
        }
    }

    /// Storage decoding. Never fails: a custom code with a missing or malformed hex decodes to
    /// the default palette colour, as does any unknown code.
    #[must_use]
    pub fn decode(code: i32, custom_hex: Option<&str>) -> Self {
        if code == CUSTOM_COLOR_CODE {
            match custom_hex.map(HexColor::parse) {
                Some(Ok(hex)) => return Self::Custom(hex),
                _ => {
                    tracing::warn!(
                        "Custom colour code stored with invalid hex {:?}; using default palette colour",
                        custom_hex
                    );
                    return Self::Palette(CropColor::default());
                }
            }
        }
        Self::Palette(CropColor::decode(code))
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// `#RRGGBB` for either variant.
    #[must_use]
    pub fn hex(&self) -> &str {
        match self {
            Self::Palette(color) => color.hex(),
            Self::Custom(hex) => hex.as_str(),
        }
    }
}

impl From<CropColor> for DisplayColor {
    fn from(value: CropColor) -> Self {
        Self::Palette(value)
    }
}

/// A tracked plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    /// Immutable identifier
    pub id: CropId,
    /// Display position, ascending
    pub order_index: i32,
    /// Trimmed, non-empty display name
    pub name: String,
    /// Icon
    pub icon: CropIcon,
    /// Palette or custom colour
    pub color: DisplayColor,
    /// Unit used when formatting quantities
    pub unit: CropUnit,
    /// Hidden from primary views but kept
    pub is_archived: bool,
    /// Creation time, second tie-break for ordering
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Crop {
    /// Ordering key used by every crop listing.
    #[must_use]
    pub const fn sort_key(&self) -> (i32, DateTime<Utc>, CropId) {
        (self.order_index, self.created_at, self.id)
    }
}

/// A dated unit of work, optionally linked to a crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Immutable identifier
    pub id: ActivityId,
    /// Owning crop; may be `None` or point at a crop that no longer exists
    pub crop_id: Option<CropId>,
    /// When the work happened; only the calendar day matters
    pub date: DateTime<Utc>,
    /// Kind of work
    pub kind: ActivityKind,
    /// Recorded amount; `None` means not recorded
    pub quantity: Option<f64>,
    /// Free-text note
    pub comment: Option<String>,
    /// Creation time; defines input order for aggregation tie-breaks
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Ordering key for "input order".
    #[must_use]
    pub const fn sort_key(&self) -> (DateTime<Utc>, ActivityId) {
        (self.created_at, self.id)
    }
}

/// Partial crop update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CropChanges {
    /// New name (validated non-empty)
    pub name: Option<String>,
    /// New icon
    pub icon: Option<CropIcon>,
    /// New colour; switching to a palette colour clears any custom hex
    pub color: Option<DisplayColor>,
    /// New unit
    pub unit: Option<CropUnit>,
}

/// Partial activity update. Double options distinguish "leave" from "clear".
#[derive(Debug, Clone, Default)]
pub struct ActivityChanges {
    /// New date
    pub date: Option<DateTime<Utc>>,
    /// New kind
    pub kind: Option<ActivityKind>,
    /// `Some(None)` clears the quantity
    pub quantity: Option<Option<f64>>,
    /// `Some(None)` clears the comment
    pub comment: Option<Option<String>>,
}

/// Selects which activities a raw listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityFilter {
    /// Every stored activity.
    All,
    /// Activities whose foreign key equals this crop id (whether or not the crop still exists).
    Crop(CropId),
    /// Activities whose foreign key is null.
    Unlinked,
}

/// Upper bound on colour dots drawn under a calendar day.
pub const DEFAULT_MAX_COLORS: usize = 3;

/// Presentation-facing settings passed explicitly into queries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Include archived crops in crop listings and harvest totals
    pub show_archived: bool,
    /// First column of the month grid
    pub first_weekday: Weekday,
    /// Maximum colour dots per calendar day
    pub max_calendar_colors: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_archived: false,
            first_weekday: Weekday::Sun,
            max_calendar_colors: DEFAULT_MAX_COLORS,
        }
    }
}

/// Trims a crop name and rejects empty results.
pub(crate) fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Crop name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Rejects negative or non-finite quantities.
pub(crate) fn validate_quantity(quantity: Option<f64>) -> Result<Option<f64>> {
    match quantity {
        Some(q) if !q.is_finite() || q < 0.0 => Err(Error::validation(format!(
            "Quantity must be a non-negative number, got {q}"
        ))),
        other => Ok(other),
    }
}

/// Blank comments are stored as `None`.
pub(crate) fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment.filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_hex_color_parse() {
        assert_eq!(HexColor::parse("#AB12CD").unwrap().as_str(), "#AB12CD");
        assert_eq!(HexColor::parse("#ab12cd").unwrap().as_str(), "#ab12cd");
        assert!(HexColor::parse("AB12CD").is_err());
        assert!(HexColor::parse("#AB12C").is_err());
        assert!(HexColor::parse("#GG12CD").is_err());
        assert!(HexColor::parse("#AB12CDEF").is_err());
        assert!(HexColor::parse("").is_err());
    }

    #[test]
    fn test_display_color_encoding() {
        let custom = DisplayColor::custom("#AB12CD").unwrap();
        assert_eq!(
            custom.encode(),
            (CUSTOM_COLOR_CODE, Some("#AB12CD".to_string()))
        );
        assert_eq!(
            DisplayColor::decode(CUSTOM_COLOR_CODE, Some("#AB12CD")),
            custom
        );

        let red = DisplayColor::Palette(CropColor::Red);
        assert_eq!(red.encode(), (3, None));
        assert_eq!(DisplayColor::decode(3, None), red);
    }

    #[test]
    fn test_display_color_decode_never_fails() {
        // Custom marker without a usable hex falls back to the default palette colour.
        assert_eq!(
            DisplayColor::decode(CUSTOM_COLOR_CODE, None),
            DisplayColor::Palette(CropColor::Teal)
        );
        assert_eq!(
            DisplayColor::decode(CUSTOM_COLOR_CODE, Some("red")),
            DisplayColor::Palette(CropColor::Teal)
        );
        // A stray hex on a palette code is ignored.
        assert_eq!(
            DisplayColor::decode(5, Some("#000000")),
            DisplayColor::Palette(CropColor::Orange)
        );
        assert_eq!(
            DisplayColor::decode(77, None),
            DisplayColor::Palette(CropColor::Teal)
        );
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  トマト ").unwrap(), "トマト");
        assert!(matches!(validate_name(""), Err(Error::Validation { .. })));
        assert!(matches!(
            validate_name(" \t\n"),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(None).unwrap(), None);
        assert_eq!(validate_quantity(Some(0.0)).unwrap(), Some(0.0));
        assert_eq!(validate_quantity(Some(2.5)).unwrap(), Some(2.5));
        assert!(validate_quantity(Some(-1.0)).is_err());
        assert!(validate_quantity(Some(f64::NAN)).is_err());
        assert!(validate_quantity(Some(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_normalize_comment() {
        assert_eq!(normalize_comment(None), None);
        assert_eq!(normalize_comment(Some("  ".to_string())), None);
        assert_eq!(
            normalize_comment(Some("朝 3L".to_string())),
            Some("朝 3L".to_string())
        );
    }

    #[test]
    fn test_hex_color_serde_rejects_malformed() {
        let ok: HexColor = parse_hex_from_toml("\"#00FF00\"").unwrap();
        assert_eq!(ok.as_str(), "#00FF00");
        assert!(parse_hex_from_toml("\"green\"").is_err());
    }

    fn parse_hex_from_toml(raw: &str) -> std::result::Result<HexColor, toml::de::Error> {
        #[derive(Deserialize)]
        struct Wrapper {
            value: HexColor,
        }
        toml::from_str::<Wrapper>(&format!("value = {raw}")).map(|w| w.value)
    }
}
