//! Crop entity - Represents a tracked plant in the garden.
//!
//! Icon, colour and unit are stored as raw integer codes and decoded leniently by
//! `core::persistence`, so a row written by a different schema version still loads.
//! A custom colour stores its `#RRGGBB` value in `custom_color_hex`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Crop database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "crops")]
pub struct Model {
    /// Stable identifier, assigned by the store
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Display order (ascending)
    pub order_index: i32,
    /// Display name (e.g., "トマト")
    pub name: String,
    /// `CropIcon` code
    pub icon_value: i32,
    /// `CropColor` code, or the custom marker
    pub color_value: i32,
    /// `#RRGGBB` when `color_value` is the custom marker, otherwise NULL
    pub custom_color_hex: Option<String>,
    /// `CropUnit` code
    pub unit_value: i32,
    /// Archive flag - if true, the crop is hidden but its data is preserved
    pub is_archived: bool,
    /// When the crop was created
    pub created_at: DateTimeUtc,
    /// When the crop was last modified
    pub updated_at: DateTimeUtc,
}

/// Crops declare no relations: activities reference them by a plain nullable column,
/// and deleting a crop must not cascade to (or be blocked by) its activities.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
