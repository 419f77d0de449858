//! Common utility functions shared across the codebase.

/// A 1-indexed position plus the text of the line it sits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCol<'a> {
    pub line: usize,
    /// Column in characters, not bytes.
    pub col: usize,
    pub source_line: &'a str,
}

/// Locate a byte offset in `text`.
///
/// Returns `None` when the offset is past the end or not on a char boundary.
///
/// # Examples
///
/// ```
/// use queryshift::utils::line_col;
///
/// let pos = line_col("a\nitems.get(0)", 8).unwrap();
/// assert_eq!((pos.line, pos.col), (2, 7));
/// assert_eq!(pos.source_line, "items.get(0)");
/// ```
pub fn line_col(text: &str, offset: usize) -> Option<LineCol<'_>> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }

    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[offset..]
        .find('\n')
        .map_or(text.len(), |i| offset + i);
    let line = text[..line_start].matches('\n').count() + 1;
    let col = text[line_start..offset].chars().count() + 1;
    let source_line = text[line_start..line_end].trim_end_matches('\r');

    Some(LineCol {
        line,
        col,
        source_line,
    })
}
