// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod adapter;
pub mod fields;
pub mod item;
pub mod normalizer;
pub mod parser;
pub mod season;

// Re-export types so callers can use `crate::model::StructuredGame` directly
pub use fields::{Field, extract};
pub use item::{CalendarEvent, RawRecord, SeasonYears, StructuredGame};
pub use season::infer_year;
