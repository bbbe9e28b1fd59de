//! Activity entity - Represents a dated piece of garden work.
//!
//! `crop_id` is a nullable reference without a foreign-key constraint. It may be NULL
//! (never linked) or point at a crop row that has since been deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Activity database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    /// Stable identifier, assigned by the store
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning crop, if any
    pub crop_id: Option<Uuid>,
    /// When the work was done; only the calendar day is meaningful
    pub date: DateTimeUtc,
    /// `ActivityKind` code
    pub kind_value: i32,
    /// Recorded quantity, NULL when not recorded
    pub quantity: Option<f64>,
    /// Optional free-text note
    pub comment: Option<String>,
    /// When the activity was created
    pub created_at: DateTimeUtc,
}

/// See `crop::Relation`: the link to crops is intentionally unconstrained.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
