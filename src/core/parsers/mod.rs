//! Source file parsers.
//!
//! - `typescript`: TS source parser (uses swc for AST generation)

pub mod typescript;

pub use typescript::{ParsedSource, parse_ts_source};
