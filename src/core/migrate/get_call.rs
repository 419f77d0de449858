//! Rewrites `QueryList.get(i)` calls to `QueryList.at(i)`.

use crate::core::{
    data::{CompilationUnitData, ProgramInfo, Replacement, TextUpdate},
    reference::{Reference, TsReference},
};

use super::property_access::{
    check_non_ts_reference_is_part_of_call_expression,
    check_ts_reference_is_part_of_call_expression,
};

/// Accessor being migrated away from.
pub const GET_METHOD: &str = "get";
/// Replacement accessor.
pub const AT_METHOD: &str = "at";

/// Append a `get` → `at` replacement for `reference` if it qualifies.
///
/// Existing entries of `replacements` are never touched.
pub fn replace_query_list_get_call(
    reference: &Reference,
    info: &ProgramInfo,
    global_metadata: &CompilationUnitData,
    replacements: &mut Vec<Replacement>,
) {
    replacements.extend(query_list_get_replacement(
        reference,
        info,
        global_metadata,
    ));
}

/// The replacement for `reference`, or `None` when it does not qualify.
pub fn query_list_get_replacement(
    reference: &Reference,
    info: &ProgramInfo,
    global_metadata: &CompilationUnitData,
) -> Option<Replacement> {
    if !global_metadata.is_multi_query(&reference.target().key) {
        return None;
    }

    if let Some(ts_ref) = reference.as_ts() {
        return ts_get_replacement(ts_ref, info);
    }

    // Template and host binding references.
    let call = check_non_ts_reference_is_part_of_call_expression(reference, GET_METHOD)?;

    let (file, offset) = match reference {
        Reference::HostBinding(host) => (&host.file, host.host_property.expression_start()?),
        Reference::Template(template) => (&template.template_file, 0),
        Reference::Ts(_) => return None,
    };

    // Spans come from the manifest; an overflowing one has no place in any file.
    let span = call.receiver.name_span.checked_offset_by(offset)?;

    Some(Replacement::new(file.clone(), TextUpdate::new(span, AT_METHOD)))
}

fn ts_get_replacement(reference: &TsReference, info: &ProgramInfo) -> Option<Replacement> {
    let call = check_ts_reference_is_part_of_call_expression(reference, GET_METHOD)?;
    let name_span = reference.source.relative_span(call.name.span);

    Some(Replacement::new(
        info.project_file(&reference.source.path),
        TextUpdate::new(name_span, AT_METHOD),
    ))
}
