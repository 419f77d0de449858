//! Core migration engine.
//!
//! ## Pipeline
//!
//! 1. **Load**: read the reference manifest and parse the files it points into
//!    (`manifest`, `parsers`, `context`)
//! 2. **Classify**: every entry becomes a [`Reference`] of one of three kinds
//!    (`reference`, `expression`)
//! 3. **Migrate**: qualifying `get(..)` calls become [`Replacement`]s (`migrate`)
//!
//! [`Replacement`]: data::Replacement

pub mod context;
pub mod data;
pub mod expression;
pub mod manifest;
pub mod migrate;
pub mod parsers;
pub mod reference;

pub use context::{MigrationContext, MigrationPlan};
pub use reference::Reference;
