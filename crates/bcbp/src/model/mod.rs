//! Data model types for BCBP.
//!
//! - Pass-level data (name, ticket indicator, unique conditional items)
//! - Flight legs and their repeated conditional items
//! - Builders (ergonomic construction)

pub mod builder;
pub mod pass;
pub mod segment;

pub use builder::{PassBuilder, SegmentBuilder};
pub use pass::{BoardingPassRecord, PassengerName, SecurityBlock, UniqueConditional};
pub use segment::{Cabin, InvalidJulianDay, JulianDay, SegmentConditional, SegmentRecord};
