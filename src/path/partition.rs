//! Partition directory names

use crate::table::TableMetadata;
use crate::types::{StringMap, DEFAULT_PARTITION_NAME};
use std::fmt::Write as _;

/// Characters that may not appear verbatim in a partition directory name
fn needs_escape(c: char) -> bool {
    matches!(
        c,
        '\u{01}'..='\u{1F}'
            | '"'
            | '#'
            | '%'
            | '\''
            | '*'
            | '/'
            | ':'
            | '='
            | '?'
            | '\\'
            | '\u{7F}'
            | '{'
            | '['
            | ']'
            | '^'
    )
}

/// Escape a partition column name or value for use as a path segment.
///
/// Reserved characters become `%XX` (uppercase hex). An empty value maps to
/// the default partition name.
pub fn escape_path_name(name: &str) -> String {
    if name.is_empty() {
        return DEFAULT_PARTITION_NAME.to_string();
    }

    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if needs_escape(c) {
            let _ = write!(escaped, "%{:02X}", c as u32);
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Build `col1=val1/col2=val2/...` from ordered column/value pairs
pub fn make_part_name<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(col, val)| format!("{}={}", escape_path_name(col), escape_path_name(val)))
        .collect::<Vec<_>>()
        .join("/")
}

/// Partition directory of `values` in the table's declared column order.
///
/// Columns without a value are skipped, so a leading subset of known values
/// yields the directory prefix shared by every partition the job may create.
pub fn partition_path(table: &TableMetadata, values: &StringMap) -> String {
    make_part_name(
        table
            .partition_column_names()
            .filter_map(|name| values.get(name).map(|v| (name, v.as_str()))),
    )
}
