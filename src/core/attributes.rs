//! Enumerated crop and activity attributes.
//!
//! Every enum here is persisted as a plain integer code. Decoding is lenient: an unknown code
//! maps to the enum's default member instead of failing the record, so rows written by a newer
//! or older schema still load.

use serde::{Deserialize, Serialize};

/// Icon shown next to a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CropIcon {
    /// Tomato (default).
    #[default]
    Tomato,
    /// Eggplant.
    Eggplant,
    /// Cucumber.
    Cucumber,
    /// Broccoli.
    Broccoli,
    /// Carrot.
    Carrot,
    /// Onion.
    Onion,
    /// Garlic.
    Garlic,
    /// Potato.
    Potato,
    /// Strawberry.
    Strawberry,
    /// Generic leafy vegetable.
    Leaf,
}

impl CropIcon {
    const ALL: [Self; 10] = [
        Self::Tomato,
        Self::Eggplant,
        Self::Cucumber,
        Self::Broccoli,
        Self::Carrot,
        Self::Onion,
        Self::Garlic,
        Self::Potato,
        Self::Strawberry,
        Self::Leaf,
    ];

    /// All icons in picker order.
    #[must_use]
    pub const fn all_values() -> &'static [Self] {
        &Self::ALL
    }

    /// Stable storage code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Tomato => 1,
            Self::Eggplant => 2,
            Self::Cucumber => 3,
            Self::Broccoli => 4,
            Self::Carrot => 5,
            Self::Onion => 6,
            Self::Garlic => 7,
            Self::Potato => 8,
            Self::Strawberry => 9,
            Self::Leaf => 10,
        }
    }

    /// Decodes a storage code, falling back to [`CropIcon::Tomato`].
    #[must_use]
    pub fn decode(code: i32) -> Self {
        Self::ALL
            .into_iter()
            .find(|icon| icon.code() == code)
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Tomato => "トマト",
            Self::Eggplant => "ナス",
            Self::Cucumber => "きゅうり",
            Self::Broccoli => "ブロッコリー",
            Self::Carrot => "にんじん",
            Self::Onion => "たまねぎ",
            Self::Garlic => "にんにく",
            Self::Potato => "じゃがいも",
            Self::Strawberry => "いちご",
            Self::Leaf => "葉物",
        }
    }

    /// Asset name the presentation layer renders for this icon.
    #[must_use]
    pub const fn symbol_name(self) -> &'static str {
        match self {
            Self::Tomato => "icon_tomato",
            Self::Eggplant => "icon_eggplant",
            Self::Cucumber => "icon_cucumber",
            Self::Broccoli => "icon_broccoli",
            Self::Carrot => "icon_carrot",
            Self::Onion => "icon_onion",
            Self::Garlic => "icon_garlic",
            Self::Potato => "icon_potato",
            Self::Strawberry => "icon_strawberry",
            Self::Leaf => "icon_leaf",
        }
    }
}

/// Palette colour for a crop. Custom colours live in [`crate::core::model::DisplayColor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CropColor {
    /// Teal (default).
    #[default]
    Teal,
    /// Green.
    Green,
    /// Red.
    Red,
    /// Brown.
    Brown,
    /// Orange.
    Orange,
    /// Yellow.
    Yellow,
}

/// Storage code marking a crop whose colour is a custom `#RRGGBB` value.
pub const CUSTOM_COLOR_CODE: i32 = 100;

impl CropColor {
    const ALL: [Self; 6] = [
        Self::Teal,
        Self::Green,
        Self::Red,
        Self::Brown,
        Self::Orange,
        Self::Yellow,
    ];

    /// All palette colours in picker order.
    #[must_use]
    pub const fn all_values() -> &'static [Self] {
        &Self::ALL
    }

    /// Stable storage code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Teal => 1,
            Self::Green => 2,
            Self::Red => 3,
            Self::Brown => 4,
            Self::Orange => 5,
            Self::Yellow => 6,
        }
    }

    /// Decodes a storage code, falling back to [`CropColor::Teal`].
    ///
    /// [`CUSTOM_COLOR_CODE`] is not a palette member and also falls back here; callers that
    /// handle custom colours check for it first.
    #[must_use]
    pub fn decode(code: i32) -> Self {
        Self::ALL
            .into_iter()
            .find(|color| color.code() == code)
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Teal => "ティール",
            Self::Green => "緑",
            Self::Red => "赤",
            Self::Brown => "茶",
            Self::Orange => "オレンジ",
            Self::Yellow => "黄",
        }
    }

    /// Semantic colour name understood by the rendering layer.
    #[must_use]
    pub const fn semantic_name(self) -> &'static str {
        match self {
            Self::Teal => "teal",
            Self::Green => "green",
            Self::Red => "red",
            Self::Brown => "brown",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
        }
    }

    /// Approximate sRGB value, for renderers without named colours.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Teal => "#30B0C7",
            Self::Green => "#34C759",
            Self::Red => "#FF3B30",
            Self::Brown => "#A2845E",
            Self::Orange => "#FF9500",
            Self::Yellow => "#FFCC00",
        }
    }
}

/// Unit used when displaying a crop's quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CropUnit {
    /// 個 (default).
    #[default]
    Piece,
    /// 本
    Stick,
    /// 玉
    Ball,
    /// 株
    Stock,
    /// 束
    Bunch,
    /// 枚
    Sheet,
    /// Kg
    Kg,
    /// g
    G,
}

impl CropUnit {
    const ALL: [Self; 8] = [
        Self::Piece,
        Self::Stick,
        Self::Ball,
        Self::Stock,
        Self::Bunch,
        Self::Sheet,
        Self::Kg,
        Self::G,
    ];

    /// All units in picker order.
    #[must_use]
    pub const fn all_values() -> &'static [Self] {
        &Self::ALL
    }

    /// Stable storage code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Piece => 1,
            Self::Stick => 2,
            Self::Ball => 3,
            Self::Stock => 4,
            Self::Bunch => 5,
            Self::Sheet => 6,
            Self::Kg => 7,
            Self::G => 8,
        }
    }

    /// Decodes a storage code, falling back to [`CropUnit::Piece`].
    #[must_use]
    pub fn decode(code: i32) -> Self {
        Self::ALL
            .into_iter()
            .find(|unit| unit.code() == code)
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Piece => "個",
            Self::Stick => "本",
            Self::Ball => "玉",
            Self::Stock => "株",
            Self::Bunch => "束",
            Self::Sheet => "枚",
            Self::Kg => "Kg",
            Self::G => "g",
        }
    }
}

/// Kind of work recorded by an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivityKind {
    /// 土づくり
    SoilPreparation,
    /// 種まき
    SowingSeeds,
    /// 苗植え
    PlantingSeedlings,
    /// 発芽
    Germination,
    /// 開花
    Flowering,
    /// 水やり
    Watering,
    /// 間引き
    ThinningOut,
    /// 追肥
    TopDressing,
    /// 芽かき
    RemoveBuds,
    /// 収穫
    Harvest,
    /// 終了
    End,
    /// その他 (default).
    #[default]
    Others,
}

impl ActivityKind {
    const ALL: [Self; 12] = [
        Self::SoilPreparation,
        Self::SowingSeeds,
        Self::PlantingSeedlings,
        Self::Germination,
        Self::Flowering,
        Self::Watering,
        Self::ThinningOut,
        Self::TopDressing,
        Self::RemoveBuds,
        Self::Harvest,
        Self::End,
        Self::Others,
    ];

    /// All kinds in picker order.
    #[must_use]
    pub const fn all_values() -> &'static [Self] {
        &Self::ALL
    }

    /// Stable storage code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::SoilPreparation => 1,
            Self::SowingSeeds => 2,
            Self::PlantingSeedlings => 3,
            Self::Germination => 4,
            Self::Flowering => 5,
            Self::Watering => 6,
            Self::ThinningOut => 7,
            Self::TopDressing => 8,
            Self::RemoveBuds => 9,
            Self::Harvest => 10,
            Self::End => 11,
            Self::Others => 12,
        }
    }

    /// Decodes a storage code, falling back to [`ActivityKind::Others`].
    #[must_use]
    pub fn decode(code: i32) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::SoilPreparation => "土づくり",
            Self::SowingSeeds => "種まき",
            Self::PlantingSeedlings => "苗植え",
            Self::Germination => "発芽",
            Self::Flowering => "開花",
            Self::Watering => "水やり",
            Self::ThinningOut => "間引き",
            Self::TopDressing => "追肥",
            Self::RemoveBuds => "芽かき",
            Self::Harvest => "収穫",
            Self::End => "終了",
            Self::Others => "その他",
        }
    }

    /// Icon token for the activity picker.
    #[must_use]
    pub const fn symbol_name(self) -> &'static str {
        match self {
            Self::SoilPreparation => "shovel",
            Self::SowingSeeds | Self::PlantingSeedlings => "leaf",
            Self::Germination => "sparkles",
            Self::Flowering => "camera.macro",
            Self::Watering => "drop",
            Self::ThinningOut | Self::RemoveBuds => "scissors",
            Self::TopDressing => "aqi.medium",
            Self::Harvest => "basket",
            Self::End => "flag.checkered",
            Self::Others => "ellipsis.circle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_and_round_trip() {
        let icon_codes: HashSet<i32> = CropIcon::all_values().iter().copied().map(CropIcon::code).collect();
        assert_eq!(icon_codes.len(), CropIcon::all_values().len());
        for icon in CropIcon::all_values() {
            assert_eq!(CropIcon::decode(icon.code()), *icon);
        }

        let color_codes: HashSet<i32> = CropColor::all_values().iter().copied().map(CropColor::code).collect();
        assert_eq!(color_codes.len(), CropColor::all_values().len());
        assert!(!color_codes.contains(&CUSTOM_COLOR_CODE));

        for unit in CropUnit::all_values() {
            assert_eq!(CropUnit::decode(unit.code()), *unit);
        }
        for kind in ActivityKind::all_values() {
            assert_eq!(ActivityKind::decode(kind.code()), *kind);
        }
    }

    #[test]
    fn test_unknown_codes_fall_back_to_defaults() {
        assert_eq!(CropIcon::decode(0), CropIcon::Tomato);
        assert_eq!(CropIcon::decode(999), CropIcon::Tomato);
        assert_eq!(CropColor::decode(-3), CropColor::Teal);
        assert_eq!(CropColor::decode(CUSTOM_COLOR_CODE), CropColor::Teal);
        assert_eq!(CropUnit::decode(42), CropUnit::Piece);
        assert_eq!(ActivityKind::decode(13), ActivityKind::Others);
    }

    #[test]
    fn test_existing_codes_keep_meaning() {
        // Codes already written by earlier app versions must keep their meaning.
        assert_eq!(CropColor::decode(3), CropColor::Red);
        assert_eq!(CropUnit::decode(7), CropUnit::Kg);
        assert_eq!(ActivityKind::decode(6), ActivityKind::Watering);
        assert_eq!(ActivityKind::decode(10), ActivityKind::Harvest);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ActivityKind::Harvest.display_name(), "収穫");
        assert_eq!(CropUnit::Piece.display_name(), "個");
        assert_eq!(CropIcon::Eggplant.display_name(), "ナス");
        assert_eq!(CropColor::Red.semantic_name(), "red");
    }
}
