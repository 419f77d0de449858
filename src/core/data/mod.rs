//! Core data types shared by the migration core and the runner.
//!
//! ## Module Structure
//!
//! - `field`: Query field identity and upstream query metadata
//! - `replacement`: Spans, file identities and the emitted replacements

pub mod field;
pub mod replacement;

pub use field::{ClassFieldDescriptor, CompilationUnitData, FieldKey, QueryFieldInfo};
pub use replacement::{ProgramInfo, ProjectFile, Replacement, TextSpan, TextUpdate};
