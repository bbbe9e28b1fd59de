/// Enumerated crop and activity attributes with their stable storage codes
pub mod attributes;
/// Domain records, identifiers and display settings
pub mod model;
/// Persistence adapters - `SeaORM` backed and in-memory
pub mod persistence;
/// Entity store - the single owner and mutator of crops and activities
pub mod store;
/// Read-only aggregation over an immutable snapshot
pub mod aggregate;
/// Month grid and calendar-day arithmetic
pub mod calendar;
/// Plain-text formatting of quantities, dates and summaries
pub mod report;
