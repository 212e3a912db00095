//! Custom partition path templates
//!
//! Handles `${column}` interpolation in custom dynamic partition paths such as
//! `${year}/${month}/data`. Values are path-escaped on substitution.

use crate::path::escape_path_name;
use crate::types::StringMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Regex for matching template variables: ${column}
static TEMPLATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([\p{L}\p{N}_]+)\}").unwrap());

/// Stands in for a column whose value is only known per row
pub const UNRESOLVED_PATTERN: &str = "[^/]*";

/// Substitute known values into a template; columns without a value become
/// [`UNRESOLVED_PATTERN`]
pub fn render(template: &str, values: &StringMap) -> String {
    TEMPLATE_REGEX
        .replace_all(template, |cap: &Captures<'_>| match values.get(&cap[1]) {
            Some(value) => escape_path_name(value),
            None => UNRESOLVED_PATTERN.to_string(),
        })
        .into_owned()
}

/// Extract all variable names from a template
pub fn extract_variables(template: &str) -> Vec<String> {
    TEMPLATE_REGEX
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}
