//! The `QueryList.get()` → `QueryList.at()` migration.
//!
//! - `property_access`: decides whether a reference is the receiver of a method call
//! - `get_call`: turns a qualifying reference into a `Replacement`

pub mod get_call;
pub mod property_access;

pub use get_call::{
    AT_METHOD, GET_METHOD, query_list_get_replacement, replace_query_list_get_call,
};
pub use property_access::{
    TemplateMethodCall, TsMethodCall, check_non_ts_reference_is_part_of_call_expression,
    check_ts_reference_is_part_of_call_expression,
};
