//! Queryshift - `QueryList.get()` to `QueryList.at()` migration planner
//!
//! Queryshift is a CLI tool and library that finds calls of the form
//! `query.get(index)` on multi-result Angular queries and plans rewriting
//! them to `query.at(index)`. Calls are found in TypeScript sources, component
//! templates and host bindings, starting from a manifest of references
//! produced by the compiler front end.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core migration engine (load, classify, migrate)
//! - `issues`: Load problems and skipped references
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
