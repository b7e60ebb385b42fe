//! Category extraction
//!
//! Picks the updates tagged with a category. A category name matches a tag
//! when it is a case-insensitive substring of the tag, so `"secur"` selects
//! updates tagged `"Security"`.

use tracing::{debug, trace};

use crate::update::{CategorizedUpdates, CategoryMatch, Updates};

/// Return every update with at least one category containing `category_name`
///
/// Pairs come back in collection order and each update appears at most once,
/// no matter how many of its categories match.
pub fn extract_category_updates(category_name: &str, updates: &Updates) -> Vec<CategoryMatch> {
    let needle = category_name.to_lowercase();

    let matches: Vec<CategoryMatch> = updates
        .iter()
        .filter(|(id, update)| {
            let matched = update.matches_category(&needle);
            trace!("Update {} matched '{}': {}", id, category_name, matched);
            matched
        })
        .map(|(id, update)| (id.clone(), update.clone()))
        .collect();

    debug!(
        "Extracted {} of {} updates for category '{}'",
        matches.len(),
        updates.len(),
        category_name
    );

    matches
}

/// Run [`extract_category_updates`] once per category and collect the results
///
/// Keys keep the order of `category_names`. A repeated name is extracted once.
pub fn categorize<I, S>(category_names: I, updates: &Updates) -> CategorizedUpdates
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut categorized = CategorizedUpdates::new();

    for name in category_names {
        let name = name.as_ref();
        if categorized.contains_key(name) {
            continue;
        }
        categorized.insert(name.to_string(), extract_category_updates(name, updates));
    }

    categorized
}
