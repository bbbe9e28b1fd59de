//! Entity module - Contains the SeaORM entity definitions for the database.
//! These entities represent the database tables. Each entity has a Model struct
//! for data and an Entity struct for operations.

pub mod activity;
pub mod crop;

// Re-export specific types to avoid conflicts
pub use activity::{Column as ActivityColumn, Entity as Activity, Model as ActivityModel};
pub use crop::{Column as CropColumn, Entity as Crop, Model as CropModel};
