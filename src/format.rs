//! Report line formatting for a single category

use tracing::debug;

use crate::update::{CategorizedUpdates, CategoryMatch};

/// Prefix of every update line
pub const BULLET: &str = "  • ";

/// Printed in place of a missing title
pub const NO_TITLE: &str = "<no title>";

/// `"<category> (<count> update)"`, pluralized unless `count` is exactly 1
pub fn header_line(category_name: &str, count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{category_name} ({count} update{suffix})")
}

/// Format the updates collected for `category_name`
///
/// Output is a header line, one bullet per update, and a trailing empty line.
/// A category missing from `categorized` is formatted as having no updates.
pub fn extract_and_format_lines(
    category_name: &str,
    categorized: &CategorizedUpdates,
) -> Vec<String> {
    let matches = categorized
        .get(category_name)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    format_category_lines(category_name, matches)
}

pub fn format_category_lines(category_name: &str, matches: &[CategoryMatch]) -> Vec<String> {
    let mut lines = Vec::with_capacity(matches.len() + 2);
    lines.push(header_line(category_name, matches.len()));

    for (_, update) in matches {
        let title = update.title.as_deref().unwrap_or(NO_TITLE);
        lines.push(format!("{BULLET}{title}"));
    }

    lines.push(String::new());

    debug!(
        "Formatted {} lines for category '{}'",
        lines.len(),
        category_name
    );

    lines
}
